//! Value at Risk (VaR) calculations.
//!
//! VaR estimates the loss over a holding period that is exceeded with
//! probability `alpha`, assuming normally (or Student-t) distributed
//! log returns. Daily volatility comes from the flat sample of log
//! returns, a GARCH(1,1) forecast, or a quoted implied volatility.

mod implied;
mod parametric;

pub use implied::*;
pub use parametric::*;

use parvar_core::{Collateral, Horizon, RiskLevel};
use parvar_math::QuantileModel;
use serde::{Deserialize, Serialize};

/// How daily volatility is estimated from a price history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VolatilityModel {
    /// Population standard deviation of all log returns.
    #[default]
    Historical,
    /// One-day-ahead GARCH(1,1) forecast.
    Garch,
}

impl std::fmt::Display for VolatilityModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VolatilityModel::Historical => f.write_str("historical"),
            VolatilityModel::Garch => f.write_str("garch"),
        }
    }
}

/// Where the daily volatility of a report came from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum VolatilitySource {
    /// Population volatility of historical log returns.
    Historical {
        /// Number of price observations.
        observations: usize,
        /// Number of log returns.
        returns: usize,
        /// Mean log return.
        mean_return: f64,
    },
    /// GARCH(1,1) forecast of the next day's volatility.
    ///
    /// Coefficients are in percent-return units.
    Garch {
        /// Number of price observations.
        observations: usize,
        /// Number of log returns fitted.
        returns: usize,
        /// Mean percent return.
        mu: f64,
        /// Variance intercept ω.
        omega: f64,
        /// ARCH coefficient α.
        alpha: f64,
        /// GARCH coefficient β.
        beta: f64,
        /// Maximized log-likelihood.
        log_likelihood: f64,
        /// Whether the fit converged.
        converged: bool,
    },
    /// Quoted annualized volatility.
    Implied {
        /// Annualized volatility in percent (e.g. 65.0 for 65%).
        annual_volatility_pct: f64,
    },
}

/// Value at Risk result with its intermediate figures.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VaRReport {
    /// Origin of the volatility estimate
    pub source: VolatilitySource,
    /// Daily volatility (standard deviation of log returns)
    pub daily_volatility: f64,
    /// Quantile multiplier applied to the volatility
    pub z_score: f64,
    /// Tail probability
    pub risk_level: RiskLevel,
    /// Notional exposed to risk
    pub collateral: Collateral,
    /// Quantile model used for the multiplier
    pub model: QuantileModel,
    /// One-day VaR
    pub daily_var: f64,
    /// Horizon the headline figure is scaled to
    pub horizon: Horizon,
    /// VaR over `horizon`
    pub horizon_var: f64,
}

impl VaRReport {
    /// Rescales the daily VaR to another horizon.
    #[must_use]
    pub fn at(&self, horizon: Horizon) -> f64 {
        self.daily_var * horizon.scaling_factor()
    }

    /// Returns the confidence level `1 - alpha`.
    #[must_use]
    pub fn confidence_level(&self) -> f64 {
        self.risk_level.confidence()
    }
}

impl std::fmt::Display for VaRReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "VaR({:.0}%, {}): {:.2}",
            self.confidence_level() * 100.0,
            self.horizon,
            self.horizon_var
        )
    }
}
