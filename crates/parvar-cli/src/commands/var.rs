//! Var command implementation.
//!
//! Computes parametric VaR from a file of historical closing prices.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use crate::cli::OutputFormat;
use crate::commands::{report_rows, RiskArgs, VarSummary};
use crate::config::CliConfig;
use crate::loader::{load_prices, InputFormat};
use crate::output::{print_header, print_result};

/// Arguments for the var command.
#[derive(Args, Debug)]
pub struct VarArgs {
    /// Price file (.json or .csv), oldest observation first
    #[arg(short, long)]
    pub prices: PathBuf,

    /// Input format. Inferred from the file extension if omitted.
    #[arg(long, value_enum)]
    pub input_format: Option<InputFormat>,

    /// Closing price field or column name
    #[arg(long)]
    pub column: Option<String>,

    #[command(flatten)]
    pub risk: RiskArgs,
}

/// Execute the var command.
pub fn execute(args: VarArgs, config: &CliConfig, format: OutputFormat, quiet: bool) -> Result<()> {
    let (params, estimator) = args.risk.resolve(config)?;

    let column = args.column.as_deref().or(config.price_column.as_deref());
    let series = load_prices(&args.prices, args.input_format, column)
        .with_context(|| format!("Failed to load prices from {}", args.prices.display()))?;

    let report = estimator.estimate(&series, &params)?;

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
