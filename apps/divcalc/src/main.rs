use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use divcalc::{command::Commands, config::Config};
use tracing_subscriber::EnvFilter;

/// Dividend calculators.
#[derive(Parser)]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Calc(cmd) => cmd.exec(Config::from_env()?).await,
        Commands::Ddm(cmd) => Ok(cmd.exec()),
    }
}
