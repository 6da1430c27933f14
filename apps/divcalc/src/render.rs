use std::io::Write;

use anyhow::Result;
use clap::ValueEnum;
use dividend::BatchReport;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Format {
    #[default]
    Text,
    Json,
}

/// Writes results to `out` and the error message, if any, to `err`.
pub fn render(
    report: &BatchReport,
    format: Format,
    out: &mut impl Write,
    err: &mut impl Write,
) -> Result<()> {
    match format {
        Format::Json => {
            serde_json::to_writer_pretty(&mut *out, report)?;
            writeln!(out)?;
        }
        Format::Text => {
            for result in report.results() {
                writeln!(out, "{result}\n")?;
            }

            if report.results().len() > 1 {
                writeln!(out, "Grand Total: ${:.2}", report.grand_total())?;
            }

            if let Some(message) = report.error_message() {
                writeln!(err, "{message}")?;
            }
        }
    }

    Ok(())
}
