use std::path::PathBuf;

use crate::error::Error;
use crate::units::Density;

/// One ordered content unit handed to the renderer. Heights are in points.
#[derive(Clone, Debug, PartialEq)]
pub enum Flowable {
    Heading { text: String, height: f32 },
    Text { text: String, height: f32 },
    /// A page-fitting slice of a screenshot, already persisted by the codec.
    ImageBand {
        path: PathBuf,
        width: f32,
        height: f32,
    },
    Spacer { height: f32 },
    PageBreak,
}

impl Flowable {
    pub fn height(&self) -> f32 {
        match self {
            Flowable::Heading { height, .. }
            | Flowable::Text { height, .. }
            | Flowable::ImageBand { height, .. }
            | Flowable::Spacer { height } => *height,
            Flowable::PageBreak => 0.0,
        }
    }
}

/// Style metadata for a run of text. `leading` is the line height in points
/// and is the only metric the layout engine reads; the renderer also uses
/// the font name and size.
#[derive(Clone, Debug)]
pub struct ParagraphStyle {
    pub font_name: String,
    pub font_size: f32,
    pub leading: f32,
}

#[derive(Clone, Debug)]
pub struct ReportStyles {
    pub heading: ParagraphStyle,
    pub body: ParagraphStyle,
}

impl Default for ReportStyles {
    fn default() -> Self {
        Self {
            heading: ParagraphStyle {
                font_name: "Helvetica-Bold".to_string(),
                font_size: 17.5,
                leading: 20.0,
            },
            body: ParagraphStyle {
                font_name: "Helvetica".to_string(),
                font_size: 12.5,
                leading: 13.5,
            },
        }
    }
}

/// Heading, body text, and the screenshot belonging to one report section.
#[derive(Clone, Debug)]
pub struct SectionContent {
    pub heading: String,
    pub body: String,
    pub screenshot: PathBuf,
}

/// Page budget the layout engine works against. The renderer owns the actual
/// page geometry; the layout only promises that flowables respect
/// `page_capacity` and `content_width`.
#[derive(Clone, Copy, Debug)]
pub struct ReportConfig {
    pub page_capacity: f32,
    pub content_width: f32,
    pub spacing: f32,
    pub density: Density,
}

impl ReportConfig {
    pub fn new(
        page_capacity: f32,
        content_width: f32,
        spacing: f32,
        density: Density,
    ) -> Result<Self, Error> {
        if !(page_capacity > 0.0) {
            return Err(Error::Config(format!(
                "page capacity must be positive, got {page_capacity}"
            )));
        }
        if !(content_width > 0.0) {
            return Err(Error::Config(format!(
                "content width must be positive, got {content_width}"
            )));
        }
        if !(spacing >= 0.0) {
            return Err(Error::Config(format!(
                "spacing must not be negative, got {spacing}"
            )));
        }
        Ok(Self {
            page_capacity,
            content_width,
            spacing,
            density,
        })
    }
}

impl Default for ReportConfig {
    /// 684 pt of flow per page and a 435 pt image budget, a letter page
    /// with generous margins.
    fn default() -> Self {
        Self {
            page_capacity: 684.0,
            content_width: 435.0,
            spacing: 20.0,
            density: Density::default(),
        }
    }
}
