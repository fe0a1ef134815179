mod codec;
mod error;
mod fonts;
mod layout;
mod model;
mod pdf;
mod units;

pub use codec::{ImageCodec, PngCodec};
pub use error::Error;
pub use layout::{Band, PageCursor, build_section, chunk_image, plan_bands, scale_to_width};
pub use model::{Flowable, ParagraphStyle, ReportConfig, ReportStyles, SectionContent};
pub use units::Density;

use std::path::Path;
use std::time::Instant;

/// Collects report sections and writes them out as one paginated PDF.
///
/// Styles and page budget default to the classic report frame (Helvetica
/// heading/body on a 684 pt page with a 435 pt screenshot budget) and can be
/// overridden before the first `add_section` call.
pub struct Report {
    pub styles: ReportStyles,
    pub config: ReportConfig,
    sections: Vec<SectionContent>,
}

impl Report {
    pub fn new() -> Self {
        Self {
            styles: ReportStyles::default(),
            config: ReportConfig::default(),
            sections: Vec::new(),
        }
    }

    pub fn with_config(config: ReportConfig) -> Self {
        Self {
            styles: ReportStyles::default(),
            config,
            sections: Vec::new(),
        }
    }

    pub fn add_section(
        &mut self,
        heading: impl Into<String>,
        body: impl Into<String>,
        screenshot: impl Into<std::path::PathBuf>,
    ) {
        self.sections.push(SectionContent {
            heading: heading.into(),
            body: body.into(),
            screenshot: screenshot.into(),
        });
    }

    /// Build every section's flowables and write the report to `output`.
    ///
    /// Band files live in a sibling directory of the output while the PDF is
    /// assembled and are removed once the bytes are on disk.
    pub fn write_to_file(&self, output: &Path) -> Result<(), Error> {
        let t0 = Instant::now();

        let band_dir = output.with_extension("bands");
        let mut codec = PngCodec::new(&band_dir);

        let mut story: Vec<Flowable> = Vec::new();
        for section in &self.sections {
            story.extend(build_section(section, &self.styles, &self.config, &mut codec)?);
        }
        let t_layout = t0.elapsed();

        let bytes = pdf::render(&story, &self.styles, &self.config)?;
        let t_render = t0.elapsed();

        std::fs::write(output, &bytes).map_err(Error::Io)?;
        if band_dir.exists() {
            std::fs::remove_dir_all(&band_dir).map_err(Error::Io)?;
        }
        let t_total = t0.elapsed();

        log::info!(
            "Timing: layout={:.1}ms, render={:.1}ms, write={:.1}ms, total={:.1}ms (output {} bytes)",
            t_layout.as_secs_f64() * 1000.0,
            (t_render - t_layout).as_secs_f64() * 1000.0,
            (t_total - t_render).as_secs_f64() * 1000.0,
            t_total.as_secs_f64() * 1000.0,
            bytes.len(),
        );

        Ok(())
    }
}

impl Default for Report {
    fn default() -> Self {
        Self::new()
    }
}

/// One-shot convenience: assemble `sections` with default styles and budget
/// and write the PDF to `output`.
pub fn build_report(sections: &[SectionContent], output: &Path) -> Result<(), Error> {
    let mut report = Report::new();
    report.sections = sections.to_vec();
    report.write_to_file(output)
}
