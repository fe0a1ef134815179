use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use webshot_pdf::{Density, Report, ReportConfig};

#[derive(Parser)]
#[command(name = "webshot-pdf")]
#[command(version)]
#[command(about = "Assemble captured web page screenshots into a paginated PDF report")]
struct Cli {
    /// Screenshot PNG files, one report section each
    #[arg(value_name = "SCREENSHOT", required = true)]
    screenshots: Vec<PathBuf>,

    /// Output PDF path
    #[arg(short, long, value_name = "FILE", default_value = "report.pdf")]
    output: PathBuf,

    /// Pixel density the screenshots were captured at
    #[arg(long, value_name = "PPI", default_value_t = 300.0)]
    ppi: f32,

    /// Vertical flow budget per page, in points
    #[arg(long, value_name = "PTS", default_value_t = 684.0)]
    page_height: f32,

    /// Width budget for screenshots, in points
    #[arg(long, value_name = "PTS", default_value_t = 435.0)]
    width: f32,
}

fn run(cli: Cli) -> Result<(), webshot_pdf::Error> {
    let density = Density::new(cli.ppi, 72.0)?;
    let config = ReportConfig::new(cli.page_height, cli.width, 20.0, density)?;

    let mut report = Report::with_config(config);
    for screenshot in &cli.screenshots {
        let heading = screenshot
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "screenshot".to_string());
        report.add_section(heading, screenshot.display().to_string(), screenshot);
    }
    report.write_to_file(&cli.output)?;
    log::info!("wrote {}", cli.output.display());
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
