use std::{fs::File, path::PathBuf, process::ExitCode};

use anyhow::{Context, Result, bail};
use dividend::{BatchRunner, DividendClient, StockRequest};
use tracing::info;

use crate::{
    config::Config,
    entry::{parse_entry, read_entries},
    render::{Format, render},
};

#[derive(clap::Args)]
pub struct CalcCommand {
    #[arg(
        short = 'e',
        long = "entry",
        value_name = "SYMBOL,START,END,SHARES",
        value_parser = parse_entry,
        help = "One holding, dates as YYYY-MM-DD; repeat for more"
    )]
    entries: Vec<StockRequest>,

    #[arg(
        short = 'f',
        long = "file",
        help = "CSV file of symbol,start,end,shares rows, read after --entry"
    )]
    file: Option<PathBuf>,

    #[arg(long = "base-url", help = "Overrides DIVIDEND_API_BASE_URL")]
    base_url: Option<String>,

    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,
}

impl CalcCommand {
    pub async fn exec(&self, config: Config) -> Result<ExitCode> {
        let mut requests = self.entries.clone();
        if let Some(path) = &self.file {
            let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
            requests.extend(
                read_entries(file).with_context(|| format!("reading {}", path.display()))?,
            );
        }

        if requests.is_empty() {
            bail!("no entries given, use --entry or --file");
        }

        let client = DividendClient::http(
            Some(self.base_url.clone().unwrap_or(config.base_api)),
            config.user_agent.as_deref(),
            config.timeout,
        )?;
        info!(base_api = client.base_api(), entries = requests.len(), "calculating dividends");

        let mut runner = BatchRunner::new(client);
        let report = runner.run_all(&requests).await;

        render(
            report,
            self.format,
            &mut std::io::stdout().lock(),
            &mut std::io::stderr().lock(),
        )?;

        Ok(if report.is_success() {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        })
    }
}
