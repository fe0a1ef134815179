mod common;

use webshot_pdf::{
    Flowable, PngCodec, ReportConfig, ReportStyles, SectionContent, build_section,
};

#[test]
fn section_orders_heading_text_spacer_bands_break() {
    let dir = tempfile::tempdir().expect("tempdir");
    let screenshot = common::solid_png(dir.path(), "page.png", 600, 900);

    let section = SectionContent {
        heading: "chrome 126".to_string(),
        body: "platform: linux\nwindow: 1280x1024".to_string(),
        screenshot,
    };
    let mut codec = PngCodec::new(dir.path().join("bands"));
    let story = build_section(
        &section,
        &ReportStyles::default(),
        &ReportConfig::default(),
        &mut codec,
    )
    .expect("build section");

    assert!(matches!(&story[0], Flowable::Heading { text, .. } if text == "chrome 126"));
    assert!(matches!(&story[1], Flowable::Text { text, .. } if text == "platform: linux"));
    assert!(matches!(&story[2], Flowable::Text { text, .. } if text == "window: 1280x1024"));
    assert!(matches!(&story[3], Flowable::Spacer { .. }));
    assert!(matches!(&story[4], Flowable::ImageBand { .. }));
    assert!(matches!(story.last(), Some(Flowable::PageBreak)));
}

#[test]
fn heading_and_text_reduce_the_first_band() {
    let dir = tempfile::tempdir().expect("tempdir");
    let screenshot = common::solid_png(dir.path(), "tall.png", 600, 3000);

    // header offset: 20 (heading) + 2 * 13.5 (body lines) + 20 (spacer) = 67 pt,
    // so page one holds (684 - 67) / 72 std = 2570 px of image
    let section = SectionContent {
        heading: "firefox 128".to_string(),
        body: "platform: linux\nwindow: 1280x1024".to_string(),
        screenshot,
    };
    let mut codec = PngCodec::new(dir.path().join("bands"));
    let story = build_section(
        &section,
        &ReportStyles::default(),
        &ReportConfig::default(),
        &mut codec,
    )
    .expect("build section");

    let bands: Vec<(u32, u32)> = story
        .iter()
        .filter_map(|f| match f {
            Flowable::ImageBand { path, .. } => {
                let img = image::open(path).expect("band file readable");
                Some((img.width(), img.height()))
            }
            _ => None,
        })
        .collect();

    assert_eq!(bands.len(), 2);
    assert_eq!(bands[0], (600, 2570));
    assert_eq!(bands[1], (600, 430));
}

#[test]
fn empty_body_still_contributes_one_text_line() {
    let dir = tempfile::tempdir().expect("tempdir");
    let screenshot = common::solid_png(dir.path(), "page.png", 600, 300);

    let section = SectionContent {
        heading: "safari".to_string(),
        body: String::new(),
        screenshot,
    };
    let mut codec = PngCodec::new(dir.path().join("bands"));
    let story = build_section(
        &section,
        &ReportStyles::default(),
        &ReportConfig::default(),
        &mut codec,
    )
    .expect("build section");

    let text_lines = story
        .iter()
        .filter(|f| matches!(f, Flowable::Text { .. }))
        .count();
    assert_eq!(text_lines, 1);
    assert_eq!(common::band_count(&story), 1);
}
