mod chunk;
mod cursor;

pub use chunk::{Band, chunk_image, plan_bands, scale_to_width};
pub use cursor::PageCursor;

use crate::codec::ImageCodec;
use crate::error::Error;
use crate::model::{Flowable, ReportConfig, ReportStyles, SectionContent};

/// Build the ordered flowable list for one section: heading, body lines,
/// spacer, image bands, and a terminating page break.
///
/// The heading and text heights come straight from the style leadings; their
/// sum is the header offset the page cursor starts from, so the first image
/// band only gets the space left under them on the first page.
pub fn build_section<C: ImageCodec>(
    section: &SectionContent,
    styles: &ReportStyles,
    config: &ReportConfig,
    codec: &mut C,
) -> Result<Vec<Flowable>, Error> {
    let mut flowables = vec![Flowable::Heading {
        text: section.heading.clone(),
        height: styles.heading.leading,
    }];
    for line in section.body.split('\n') {
        flowables.push(Flowable::Text {
            text: line.to_string(),
            height: styles.body.leading,
        });
    }
    flowables.push(Flowable::Spacer {
        height: config.spacing,
    });

    let header_offset: f32 = flowables.iter().map(Flowable::height).sum();
    let mut cursor = PageCursor::new(config.page_capacity, config.density)?;
    cursor.advance(header_offset);

    let bands = chunk_image(
        codec,
        &section.screenshot,
        config.content_width,
        &mut cursor,
        config.density,
    )?;
    flowables.extend(bands);
    flowables.push(Flowable::PageBreak);
    Ok(flowables)
}
