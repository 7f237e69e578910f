//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use parvar_core::Horizon;
use parvar_risk::var::VolatilityModel;

use crate::commands::{BatchArgs, ImpliedArgs, VarArgs};

/// Parvar - Parametric value-at-risk from historical prices
#[derive(Parser)]
#[command(name = "parvar")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,

    /// Configuration file (defaults to ./parvar.toml when present)
    #[arg(short, long, global = true, env = "PARVAR_CONFIG")]
    pub config: Option<PathBuf>,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Compute VaR from a file of historical closing prices
    Var(VarArgs),

    /// Compute VaR from a quoted annualized volatility
    Implied(ImpliedArgs),

    /// Compute VaR for every request in a JSON manifest
    Batch(BatchArgs),
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
    /// Minimal output (just the value)
    Minimal,
}

/// Quantile model selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ModelKind {
    /// Standard normal quantile
    #[default]
    Normal,
    /// Student-t quantile (ν fitted to the returns unless --dof is given)
    StudentT,
    /// Legacy arithmetic: multiplier equals minus the risk level
    Legacy,
}

/// Volatility estimator selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VolatilityKind {
    /// Population volatility of all log returns
    #[default]
    Historical,
    /// One-day-ahead GARCH(1,1) forecast
    Garch,
}

impl From<VolatilityKind> for VolatilityModel {
    fn from(kind: VolatilityKind) -> Self {
        match kind {
            VolatilityKind::Historical => VolatilityModel::Historical,
            VolatilityKind::Garch => VolatilityModel::Garch,
        }
    }
}

/// Parses a horizon name or a legacy period code (0, 1, 2).
pub fn parse_horizon(s: &str) -> Result<Horizon, String> {
    match s.trim().parse::<i64>() {
        Ok(code) => Horizon::from_code(code),
        Err(_) => s.parse::<Horizon>(),
    }
    .map_err(|e| e.to_string())
}
