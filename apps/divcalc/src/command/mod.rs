mod calc;
mod ddm;

pub use calc::CalcCommand;
pub use ddm::DdmCommand;

#[derive(clap::Subcommand)]
pub enum Commands {
    #[command(about = "Total dividends paid on a set of holdings over a date range")]
    Calc(CalcCommand),

    #[command(about = "Share price under the dividend discount model, D1 / (r - g)")]
    Ddm(DdmCommand),
}
