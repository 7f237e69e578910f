//! Implied command implementation.
//!
//! Computes VaR from a quoted annualized volatility instead of a price history.

use anyhow::Result;
use clap::Args;

use crate::cli::OutputFormat;
use crate::commands::{report_rows, RiskArgs, VarSummary};
use crate::config::CliConfig;
use crate::output::{print_header, print_result};

/// Arguments for the implied command.
#[derive(Args, Debug)]
pub struct ImpliedArgs {
    /// Annualized volatility in percent (e.g. 65 for 65%)
    #[arg(long)]
    pub vol: f64,

    #[command(flatten)]
    pub risk: RiskArgs,
}

/// Execute the implied command.
pub fn execute(
    args: ImpliedArgs,
    config: &CliConfig,
    format: OutputFormat,
    quiet: bool,
) -> Result<()> {
    let (params, estimator) = args.risk.resolve(config)?;
    let report = estimator.estimate_implied(args.vol, &params)?;

    if format == OutputFormat::Table && !quiet {
        print_header(&report.to_string());
    }
    print_result(
        &report_rows(&report),
        &VarSummary::from(&report),
        report.horizon_var,
        format,
    )
}
