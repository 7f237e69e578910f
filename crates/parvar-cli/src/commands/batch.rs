//! Batch command implementation.
//!
//! Evaluates every request of a JSON manifest in parallel. Each entry is
//! independent: one failing entry is reported in its row and does not stop
//! the others.

use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use clap::Args;
use serde::{Deserialize, Serialize};
use tabled::Tabled;

use parvar_core::{Horizon, PriceSeries, RiskParameters, VarError};
use parvar_risk::batch::{evaluate_batch, BatchResult, VaRRequest};
use parvar_risk::var::ParametricVar;

use crate::cli::{ModelKind, OutputFormat, VolatilityKind};
use crate::config::{quantile_model, CliConfig};
use crate::error::{CliError, CliResult};
use crate::loader::load_prices;
use crate::output::{format_amount, print_records, print_warning};

/// Arguments for the batch command.
#[derive(Args, Debug)]
pub struct BatchArgs {
    /// JSON manifest: an array of {id, prices | prices_file, risk_level?, collateral?, horizon?}
    #[arg(long)]
    pub manifest: PathBuf,

    /// Quantile model applied to every request
    #[arg(short, long, value_enum)]
    pub model: Option<ModelKind>,

    /// Degrees of freedom for the student-t model (fitted when omitted)
    #[arg(long)]
    pub dof: Option<f64>,

    /// Volatility estimator applied to every request
    #[arg(long, value_enum)]
    pub volatility: Option<VolatilityKind>,
}

/// One manifest entry. Unset parameters fall back to the configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ManifestEntry {
    pub id: String,
    #[serde(default)]
    pub prices: Option<Vec<f64>>,
    #[serde(default)]
    pub prices_file: Option<PathBuf>,
    #[serde(default)]
    pub risk_level: Option<f64>,
    #[serde(default)]
    pub collateral: Option<f64>,
    #[serde(default)]
    pub horizon: Option<Horizon>,
}

/// One row of batch output.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct BatchRow {
    #[tabled(rename = "ID")]
    pub id: String,
    #[tabled(rename = "Horizon")]
    pub horizon: String,
    #[tabled(rename = "Status")]
    pub status: String,
    #[tabled(rename = "VaR")]
    pub var: String,
    #[tabled(rename = "Message")]
    pub message: String,
}

impl BatchRow {
    fn from_result(result: &BatchResult, horizon: Horizon) -> Self {
        let horizon = horizon.to_string();
        match &result.outcome {
            Ok(report) => Self {
                id: result.id.clone(),
                horizon,
                status: "ok".into(),
                var: format_amount(report.horizon_var),
                message: String::new(),
            },
            Err(err) => Self {
                id: result.id.clone(),
                horizon,
                status: err.kind().into(),
                var: String::new(),
                message: err.to_string(),
            },
        }
    }
}

/// Reads a manifest file.
pub fn read_manifest(path: &Path) -> CliResult<Vec<ManifestEntry>> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

fn entry_series(entry: &ManifestEntry, base_dir: &Path, index: usize) -> CliResult<PriceSeries> {
    match (&entry.prices, &entry.prices_file) {
        (Some(prices), None) => Ok(PriceSeries::from_closes(prices)),
        (None, Some(file)) => load_prices(&base_dir.join(file), None, None),
        _ => Err(CliError::InvalidRecord {
            index,
            reason: format!("entry '{}' needs exactly one of prices, prices_file", entry.id),
        }),
    }
}

/// Resolves the parameters and price series of one entry.
///
/// A missing or unreadable price source is reported as an invalid `prices`
/// parameter of that entry.
fn prepare_entry(
    entry: &ManifestEntry,
    config: &CliConfig,
    base_dir: &Path,
    index: usize,
) -> Result<(PriceSeries, RiskParameters), VarError> {
    let params = RiskParameters::new(
        entry.risk_level.unwrap_or(config.risk_level),
        entry.collateral.unwrap_or(config.collateral),
        entry.horizon.unwrap_or(config.horizon),
    )?;
    let series = entry_series(entry, base_dir, index)
        .map_err(|err| VarError::invalid_parameter("prices", err.to_string()))?;
    Ok((series, params))
}

/// Execute the batch command.
pub fn execute(args: BatchArgs, config: &CliConfig, format: OutputFormat, quiet: bool) -> Result<()> {
    let model = quantile_model(
        args.model.unwrap_or(config.model),
        args.dof.or(config.degrees_of_freedom),
    );
    let volatility = args.volatility.unwrap_or(config.volatility);
    let estimator = ParametricVar::new(model).with_volatility(volatility.into());

    let entries = read_manifest(&args.manifest)?;
    let base_dir = args.manifest.parent().unwrap_or_else(|| Path::new("."));

    // Entries that cannot be prepared fail up front; the rest run in parallel.
    let mut requests = Vec::new();
    let mut slots = Vec::with_capacity(entries.len());
    let mut horizons = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        horizons.push(entry.horizon.unwrap_or(config.horizon));

        match prepare_entry(entry, config, base_dir, index) {
            Ok((series, params)) => {
                requests.push(VaRRequest::new(entry.id.clone(), series, params));
                slots.push(None);
            }
            Err(err) => {
                tracing::warn!("Batch entry '{}' skipped: {}", entry.id, err);
                slots.push(Some(BatchResult {
                    id: entry.id.clone(),
                    outcome: Err(err),
                }));
            }
        }
    }

    let mut evaluated = evaluate_batch(&requests, &estimator).into_iter();
    let results: Vec<BatchResult> = slots
        .into_iter()
        .filter_map(|slot| slot.or_else(|| evaluated.next()))
        .collect();

    let rows: Vec<BatchRow> = results
        .iter()
        .zip(horizons)
        .map(|(result, horizon)| BatchRow::from_result(result, horizon))
        .collect();
    let headlines: Vec<String> = results
        .iter()
        .map(|r| match &r.outcome {
            Ok(report) => report.horizon_var.to_string(),
            Err(err) => err.kind().to_string(),
        })
        .collect();

    print_records(&rows, &headlines, format)?;

    let failed: Vec<&str> = results
        .iter()
        .filter(|r| r.outcome.is_err())
        .map(|r| r.id.as_str())
        .collect();
    if !failed.is_empty() {
        if !quiet {
            print_warning(&format!("Failed requests: {}", failed.join(", ")));
        }
        bail!("{} of {} batch requests failed", failed.len(), results.len());
    }
    Ok(())
}
