//! Parametric (variance-covariance) VaR from historical prices.

use parvar_core::{Horizon, PriceSeries, RiskParameters, VarError, VarResult};
use parvar_math::garch::fit_garch;
use parvar_math::{statistics::log_returns, MathError, QuantileModel, ReturnStats};
use serde::{Deserialize, Serialize};

use super::{VaRReport, VolatilityModel, VolatilitySource};

/// Parametric VaR estimator.
///
/// `VaR = collateral × z × σ_daily × √periods`, where `σ_daily` comes from
/// the configured [`VolatilityModel`] and `z` is the left-tail multiplier
/// of the configured [`QuantileModel`].
///
/// The estimator holds no state between calls; one instance can be shared
/// across threads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ParametricVar {
    model: QuantileModel,
    #[serde(default)]
    volatility: VolatilityModel,
}

impl ParametricVar {
    /// Creates an estimator using the given quantile model and historical
    /// volatility.
    #[must_use]
    pub fn new(model: QuantileModel) -> Self {
        Self {
            model,
            volatility: VolatilityModel::Historical,
        }
    }

    /// Sets the volatility model.
    #[must_use]
    pub fn with_volatility(mut self, volatility: VolatilityModel) -> Self {
        self.volatility = volatility;
        self
    }

    /// Returns the quantile model.
    #[must_use]
    pub fn model(&self) -> QuantileModel {
        self.model
    }

    /// Returns the volatility model.
    #[must_use]
    pub fn volatility_model(&self) -> VolatilityModel {
        self.volatility
    }

    /// Estimates VaR for a price series.
    ///
    /// # Errors
    ///
    /// - `VarError::InsufficientData` with fewer than two prices, or fewer
    ///   than the fitted models need
    /// - `VarError::NonPositivePrice` if any price is zero, negative or NaN
    /// - `VarError::InvalidParameter` if the quantile model is misconfigured
    /// - `VarError::NonFiniteResult` if the figure overflows
    pub fn estimate(&self, series: &PriceSeries, params: &RiskParameters) -> VarResult<VaRReport> {
        self.estimate_closes(&series.closes(), params)
    }

    /// Estimates VaR for a slice of closing prices.
    pub fn estimate_closes(&self, prices: &[f64], params: &RiskParameters) -> VarResult<VaRReport> {
        let returns = log_returns(prices)?;
        let stats = ReturnStats::from_returns(&returns)?;

        tracing::debug!(
            observations = prices.len(),
            mean = stats.mean,
            volatility = stats.volatility,
            "return statistics"
        );

        let historical = VolatilitySource::Historical {
            observations: prices.len(),
            returns: stats.count,
            mean_return: stats.mean,
        };

        // Constant returns leave GARCH and ν unidentified; VaR is zero anyway.
        if stats.is_degenerate() {
            tracing::warn!("log returns are constant; volatility and VaR are zero");
            let model = if self.model.needs_fit() {
                QuantileModel::Normal
            } else {
                self.model
            };
            return self.report(historical, stats.volatility, model, params);
        }

        let model = self.model.resolve(&returns).map_err(in_prices)?;
        if model != self.model {
            tracing::info!(model = %model, "fitted student-t degrees of freedom");
        }

        let (source, daily_volatility) = match self.volatility {
            VolatilityModel::Historical => (historical, stats.volatility),
            VolatilityModel::Garch => {
                let fit = fit_garch(&returns).map_err(in_prices)?;
                if !fit.converged {
                    tracing::warn!(
                        iterations = fit.iterations,
                        "GARCH fit did not converge; using the last estimate"
                    );
                }
                tracing::info!(
                    omega = fit.params.omega,
                    alpha = fit.params.alpha,
                    beta = fit.params.beta,
                    forecast = fit.daily_volatility(),
                    "GARCH(1,1) volatility"
                );
                let source = VolatilitySource::Garch {
                    observations: prices.len(),
                    returns: fit.observations,
                    mu: fit.params.mu,
                    omega: fit.params.omega,
                    alpha: fit.params.alpha,
                    beta: fit.params.beta,
                    log_likelihood: fit.log_likelihood,
                    converged: fit.converged,
                };
                (source, fit.daily_volatility())
            }
        };

        self.report(source, daily_volatility, model, params)
    }

    /// Builds a report from a daily volatility.
    pub(crate) fn report(
        &self,
        source: VolatilitySource,
        daily_volatility: f64,
        model: QuantileModel,
        params: &RiskParameters,
    ) -> VarResult<VaRReport> {
        let risk_level = params.risk_level();
        let collateral = params.collateral();
        let horizon = params.horizon();

        let z_score = model.multiplier(risk_level.alpha())?;
        let daily_var = collateral.amount() * z_score * daily_volatility;
        if !daily_var.is_finite() {
            return Err(VarError::non_finite("daily VaR"));
        }

        let horizon_var = daily_var * horizon.scaling_factor();
        if !horizon_var.is_finite() {
            return Err(VarError::non_finite(format!("{horizon} VaR")));
        }

        tracing::debug!(
            z_score,
            daily_var,
            horizon = %horizon,
            horizon_var,
            model = %model,
            "parametric VaR"
        );

        Ok(VaRReport {
            source,
            daily_volatility,
            z_score,
            risk_level,
            collateral,
            model,
            daily_var,
            horizon,
            horizon_var,
        })
    }
}

/// Restates a fit's minimum in prices rather than returns.
fn in_prices(err: MathError) -> VarError {
    match err {
        MathError::InsufficientData { required, actual } => {
            VarError::insufficient_data(required + 1, actual + 1)
        }
        other => other.into(),
    }
}

/// Computes parametric VaR with the standard normal multiplier.
///
/// # Arguments
///
/// * `prices` - Daily closing prices, oldest first
/// * `risk_level` - Tail probability, e.g. 0.01 for 99% confidence
/// * `collateral` - Notional exposed to risk
/// * `horizon` - Holding period the daily figure is scaled to
///
/// # Errors
///
/// Parameters are checked before the series: an out-of-range risk level or
/// collateral fails with `VarError::InvalidParameter` even when the series
/// is also too short.
pub fn compute_var(
    prices: &[f64],
    risk_level: f64,
    collateral: f64,
    horizon: Horizon,
) -> VarResult<f64> {
    let params = RiskParameters::new(risk_level, collateral, horizon)?;
    ParametricVar::default()
        .estimate_closes(prices, &params)
        .map(|report| report.horizon_var)
}
