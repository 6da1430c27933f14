use std::process::ExitCode;

use dividend::{DividendResult, ddm};
use tracing::warn;

#[derive(clap::Args)]
pub struct DdmCommand {
    #[arg(
        long = "dividend",
        allow_hyphen_values = true,
        help = "Expected dividend next period (D1)"
    )]
    dividend: String,

    #[arg(
        long = "rate",
        allow_hyphen_values = true,
        help = "Required rate of return, in percent"
    )]
    rate: String,

    #[arg(
        long = "growth",
        allow_hyphen_values = true,
        help = "Dividend growth rate, in percent"
    )]
    growth: String,
}

impl DdmCommand {
    pub fn exec(&self) -> ExitCode {
        match self.quote() {
            Ok(line) => {
                println!("{line}");
                ExitCode::SUCCESS
            }
            Err(e) => {
                warn!(error = %e, "ddm rejected input");
                eprintln!("{e}");
                ExitCode::FAILURE
            }
        }
    }

    fn quote(&self) -> DividendResult<String> {
        let price = ddm::price_from_text(&self.dividend, &self.rate, &self.growth)?;
        Ok(ddm::render_price(price))
    }
}
