//! CLI command implementations.

pub mod batch;
pub mod implied;
pub mod var;

// Re-export submodules for convenience
pub use batch::BatchArgs;
pub use implied::ImpliedArgs;
pub use var::VarArgs;

use clap::Args;
use serde::Serialize;

use parvar_core::{Horizon, RiskParameters};
use parvar_risk::var::{ParametricVar, VaRReport, VolatilitySource};

use crate::cli::{parse_horizon, ModelKind, VolatilityKind};
use crate::config::{quantile_model, CliConfig};
use crate::output::KeyValue;

/// Risk parameters shared by the single-estimate commands.
///
/// Unset flags fall back to the configuration file.
#[derive(Args, Debug, Clone, Default)]
pub struct RiskArgs {
    /// Tail probability, e.g. 0.01 for 99% confidence
    #[arg(short, long)]
    pub risk_level: Option<f64>,

    /// Notional exposed to risk
    #[arg(long)]
    pub collateral: Option<f64>,

    /// Holding period: daily, monthly, yearly (or 0, 1, 2)
    #[arg(long, value_parser = parse_horizon)]
    pub horizon: Option<Horizon>,

    /// Quantile model
    #[arg(short, long, value_enum)]
    pub model: Option<ModelKind>,

    /// Degrees of freedom for the student-t model (fitted when omitted)
    #[arg(long)]
    pub dof: Option<f64>,

    /// Volatility estimator for price histories
    #[arg(long, value_enum)]
    pub volatility: Option<VolatilityKind>,
}

impl RiskArgs {
    /// Merges flags with the configuration and validates the result.
    pub fn resolve(&self, config: &CliConfig) -> anyhow::Result<(RiskParameters, ParametricVar)> {
        let params = RiskParameters::new(
            self.risk_level.unwrap_or(config.risk_level),
            self.collateral.unwrap_or(config.collateral),
            self.horizon.unwrap_or(config.horizon),
        )?;
        let model = quantile_model(
            self.model.unwrap_or(config.model),
            self.dof.or(config.degrees_of_freedom),
        );
        let volatility = self.volatility.unwrap_or(config.volatility);
        Ok((params, ParametricVar::new(model).with_volatility(volatility.into())))
    }
}

/// Flat record of a report for JSON and CSV output.
#[derive(Debug, Clone, Serialize)]
pub struct VarSummary {
    pub source: &'static str,
    pub observations: Option<usize>,
    pub annual_volatility_pct: Option<f64>,
    pub garch_omega: Option<f64>,
    pub garch_alpha: Option<f64>,
    pub garch_beta: Option<f64>,
    pub risk_level: f64,
    pub confidence: f64,
    pub collateral: f64,
    pub model: String,
    pub daily_volatility: f64,
    pub z_score: f64,
    pub daily_var: f64,
    pub monthly_var: f64,
    pub yearly_var: f64,
    pub horizon: Horizon,
    pub horizon_var: f64,
}

impl From<&VaRReport> for VarSummary {
    fn from(report: &VaRReport) -> Self {
        let mut garch = None;
        let (source, observations, annual_volatility_pct) = match report.source {
            VolatilitySource::Historical { observations, .. } => {
                ("historical", Some(observations), None)
            }
            VolatilitySource::Garch {
                observations,
                omega,
                alpha,
                beta,
                ..
            } => {
                garch = Some((omega, alpha, beta));
                ("garch", Some(observations), None)
            }
            VolatilitySource::Implied {
                annual_volatility_pct,
            } => ("implied", None, Some(annual_volatility_pct)),
        };

        Self {
            source,
            observations,
            annual_volatility_pct,
            garch_omega: garch.map(|g| g.0),
            garch_alpha: garch.map(|g| g.1),
            garch_beta: garch.map(|g| g.2),
            risk_level: report.risk_level.alpha(),
            confidence: report.confidence_level(),
            collateral: report.collateral.amount(),
            model: report.model.to_string(),
            daily_volatility: report.daily_volatility,
            z_score: report.z_score,
            daily_var: report.daily_var,
            monthly_var: report.at(Horizon::Monthly),
            yearly_var: report.at(Horizon::Yearly),
            horizon: report.horizon,
            horizon_var: report.horizon_var,
        }
    }
}

/// Builds the metric rows shown in table output.
pub fn report_rows(report: &VaRReport) -> Vec<KeyValue> {
    let mut rows = Vec::new();

    match report.source {
        VolatilitySource::Historical {
            observations,
            returns,
            mean_return,
        } => {
            rows.push(KeyValue::new("Observations", observations.to_string()));
            rows.push(KeyValue::new("Log Returns", returns.to_string()));
            rows.push(KeyValue::percent("Mean Return", mean_return));
        }
        VolatilitySource::Garch {
            observations,
            returns,
            omega,
            alpha,
            beta,
            log_likelihood,
            converged,
            ..
        } => {
            rows.push(KeyValue::new("Observations", observations.to_string()));
            rows.push(KeyValue::new("Log Returns", returns.to_string()));
            rows.push(KeyValue::fixed("GARCH Omega", omega, 6));
            rows.push(KeyValue::fixed("GARCH Alpha", alpha, 6));
            rows.push(KeyValue::fixed("GARCH Beta", beta, 6));
            rows.push(KeyValue::fixed("Persistence", alpha + beta, 6));
            rows.push(KeyValue::fixed("Log-Likelihood", log_likelihood, 4));
            if !converged {
                rows.push(KeyValue::new("Converged", "no"));
            }
        }
        VolatilitySource::Implied {
            annual_volatility_pct,
        } => {
            rows.push(KeyValue::fixed("Annual Volatility (%)", annual_volatility_pct, 4));
        }
    }

    rows.push(KeyValue::percent("Daily Volatility", report.daily_volatility));
    rows.push(KeyValue::new("Model", report.model.to_string()));
    rows.push(KeyValue::fixed("Z-Score", report.z_score, 6));
    rows.push(KeyValue::new("Risk Level", report.risk_level.to_string()));
    rows.push(KeyValue::percent("Confidence", report.confidence_level()));
    rows.push(KeyValue::amount("Collateral", report.collateral.amount()));
    for horizon in Horizon::ALL {
        rows.push(KeyValue::amount(
            format!("VaR ({horizon})"),
            report.at(horizon),
        ));
    }
    rows
}
