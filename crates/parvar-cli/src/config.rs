//! CLI configuration.
//!
//! Values here are defaults; command-line flags take precedence. Risk
//! parameters are kept as raw numbers and validated when the estimate runs.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use parvar_core::Horizon;
use parvar_math::QuantileModel;

use crate::cli::{ModelKind, VolatilityKind};
use crate::error::{CliError, CliResult};

/// File looked up in the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "parvar.toml";

/// CLI configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CliConfig {
    /// Tail probability
    #[serde(default = "default_risk_level")]
    pub risk_level: f64,

    /// Notional exposed to risk
    #[serde(default = "default_collateral")]
    pub collateral: f64,

    /// Holding period
    #[serde(default = "default_horizon")]
    pub horizon: Horizon,

    /// Quantile model
    #[serde(default)]
    pub model: ModelKind,

    /// Degrees of freedom for the Student-t model. Fitted when unset.
    pub degrees_of_freedom: Option<f64>,

    /// Volatility estimator for price histories
    #[serde(default)]
    pub volatility: VolatilityKind,

    /// Closing price column in CSV input
    pub price_column: Option<String>,
}

fn default_risk_level() -> f64 {
    0.01
}

fn default_collateral() -> f64 {
    10_000.0
}

fn default_horizon() -> Horizon {
    Horizon::Yearly
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            risk_level: default_risk_level(),
            collateral: default_collateral(),
            horizon: default_horizon(),
            model: ModelKind::default(),
            degrees_of_freedom: None,
            volatility: VolatilityKind::default(),
            price_column: None,
        }
    }
}

impl CliConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> CliResult<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| CliError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Resolves the configuration for a run.
    ///
    /// An explicit path must exist. Without one, `parvar.toml` in the
    /// working directory is used if present, otherwise the defaults.
    pub fn load(explicit: Option<&Path>) -> CliResult<Self> {
        if let Some(path) = explicit {
            tracing::info!("Loading configuration from {}", path.display());
            return Self::from_file(path);
        }

        let fallback = PathBuf::from(DEFAULT_CONFIG_FILE);
        if fallback.exists() {
            tracing::info!("Loading configuration from {}", fallback.display());
            Self::from_file(&fallback)
        } else {
            tracing::debug!("Using default configuration");
            Ok(Self::default())
        }
    }
}

/// Builds the quantile model for a model selector.
///
/// Student-t without degrees of freedom fits ν to each return series.
pub fn quantile_model(kind: ModelKind, degrees_of_freedom: Option<f64>) -> QuantileModel {
    match kind {
        ModelKind::Normal => QuantileModel::Normal,
        ModelKind::Legacy => QuantileModel::LegacyLiteral,
        ModelKind::StudentT => {
            degrees_of_freedom.map_or(QuantileModel::FittedStudentT, QuantileModel::student_t)
        }
    }
}
