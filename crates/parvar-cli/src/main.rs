//! Parvar CLI - Command-line interface for parametric value-at-risk.
//!
//! # Usage
//!
//! ```bash
//! # Yearly VaR at 99% on 10,000 of collateral
//! parvar var --prices price_data.json --risk-level 0.01 --collateral 10000 --horizon yearly
//!
//! # Student-t multiplier, JSON output
//! parvar --format json var --prices prices.csv --model student-t --dof 5
//!
//! # GARCH(1,1) volatility with a fitted Student-t tail
//! parvar var --prices prices.csv --volatility garch --model student-t
//!
//! # VaR from a quoted annualized volatility of 65%
//! parvar implied --vol 65 --horizon daily
//!
//! # Many independent requests
//! parvar batch --manifest portfolios.json
//! ```

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use parvar_core::VarError;

mod cli;
mod commands;
mod config;
mod error;
mod loader;
mod output;

use cli::{Cli, Commands};
use config::CliConfig;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report_error(&err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = CliConfig::load(cli.config.as_deref())?;
    let format = cli.format;
    let quiet = cli.quiet;

    match cli.command {
        Commands::Var(args) => commands::var::execute(args, &config, format, quiet)?,
        Commands::Implied(args) => commands::implied::execute(args, &config, format, quiet)?,
        Commands::Batch(args) => commands::batch::execute(args, &config, format, quiet)?,
    }

    Ok(())
}

/// Logs go to stderr so stdout carries only results.
fn init_tracing(verbose: u8, quiet: bool) {
    let default = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn,parvar_cli=info,parvar_risk=info,parvar_math=info",
        (false, 1) => "info,parvar_cli=debug,parvar_risk=debug,parvar_math=debug",
        (false, _) => "debug,parvar_cli=trace,parvar_risk=trace,parvar_math=trace",
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Prints the error kind and message; never a figure.
fn report_error(err: &anyhow::Error) {
    match err.chain().find_map(|e| e.downcast_ref::<VarError>()) {
        Some(var_err) => output::print_error(&format!("{}: {}", var_err.kind(), var_err)),
        None => output::print_error(&format!("{err:#}")),
    }
}
