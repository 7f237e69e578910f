//! Return statistics.
//!
//! Volatility here is the population standard deviation of log returns:
//! squared deviations are divided by `n`, not `n - 1`.

use serde::{Deserialize, Serialize};

use crate::error::{MathError, MathResult};

/// Computes the log return series `ln(p[i] / p[i - 1])`.
///
/// Every price is checked before any logarithm is taken, so a zero prior
/// price never turns into an infinite return.
///
/// # Errors
///
/// - `MathError::InsufficientData` with fewer than two prices
/// - `MathError::NonPositiveValue` for the first price that is not a
///   positive finite number
/// - `MathError::NonFinite` if a ratio overflows
///
/// # Example
///
/// ```rust
/// use parvar_math::statistics::log_returns;
///
/// let returns = log_returns(&[100.0, 110.0, 99.0]).unwrap();
/// assert_eq!(returns.len(), 2);
/// assert!((returns[0] - (1.1f64).ln()).abs() < 1e-15);
/// ```
pub fn log_returns(prices: &[f64]) -> MathResult<Vec<f64>> {
    if prices.len() < 2 {
        return Err(MathError::insufficient_data(2, prices.len()));
    }

    if let Some((index, &value)) = prices
        .iter()
        .enumerate()
        .find(|(_, p)| !(p.is_finite() && **p > 0.0))
    {
        return Err(MathError::NonPositiveValue { index, value });
    }

    let returns: Vec<f64> = prices.windows(2).map(|w| (w[1] / w[0]).ln()).collect();

    if returns.iter().any(|r| !r.is_finite()) {
        return Err(MathError::non_finite("log return"));
    }

    log::trace!("computed {} log returns", returns.len());
    Ok(returns)
}

/// Arithmetic mean.
pub fn mean(values: &[f64]) -> MathResult<f64> {
    if values.is_empty() {
        return Err(MathError::insufficient_data(1, 0));
    }
    Ok(values.iter().sum::<f64>() / values.len() as f64)
}

/// Population variance: mean of squared deviations from the mean.
pub fn population_variance(values: &[f64]) -> MathResult<f64> {
    let mu = mean(values)?;
    let sum_sq: f64 = values.iter().map(|x| (x - mu).powi(2)).sum();
    Ok(sum_sq / values.len() as f64)
}

/// Population standard deviation.
pub fn volatility(values: &[f64]) -> MathResult<f64> {
    let variance = population_variance(values)?;
    if !variance.is_finite() {
        return Err(MathError::non_finite("variance"));
    }
    Ok(variance.sqrt())
}

/// Summary statistics of a log return series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReturnStats {
    /// Number of log returns.
    pub count: usize,
    /// Mean log return.
    pub mean: f64,
    /// Population variance of the log returns.
    pub variance: f64,
    /// Population standard deviation (daily volatility).
    pub volatility: f64,
}

impl ReturnStats {
    /// Summarises a log return series.
    pub fn from_returns(returns: &[f64]) -> MathResult<Self> {
        let mean = mean(returns)?;
        let variance = population_variance(returns)?;
        if !(mean.is_finite() && variance.is_finite()) {
            return Err(MathError::non_finite("return statistics"));
        }

        Ok(Self {
            count: returns.len(),
            mean,
            variance,
            volatility: variance.sqrt(),
        })
    }

    /// Computes log returns from prices and summarises them.
    pub fn from_prices(prices: &[f64]) -> MathResult<Self> {
        let returns = log_returns(prices)?;
        Self::from_returns(&returns)
    }

    /// Returns true if every log return was identical.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.volatility == 0.0
    }
}
