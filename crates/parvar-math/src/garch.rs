//! GARCH(1,1) conditional volatility.
//!
//! Returns are modelled as `r_t = μ + ε_t` with conditional variance
//!
//! ```text
//! σ²_t = ω + α·ε²_{t-1} + β·σ²_{t-1}
//! ```
//!
//! Parameters are fitted by Gaussian maximum likelihood on percent returns
//! (log returns × 100), which keeps ω away from the bottom of the f64
//! range. The one-step-ahead forecast is converted back to a daily
//! volatility of log returns.

use serde::{Deserialize, Serialize};

use crate::error::{MathError, MathResult};
use crate::optimization::{nelder_mead, OptimizationConfig};
use crate::statistics::{mean, population_variance};

/// Scale applied to log returns before fitting.
pub const RETURN_SCALE: f64 = 100.0;

/// Fewest log returns a GARCH(1,1) fit accepts.
pub const MIN_GARCH_RETURNS: usize = 10;

/// Observations used to seed the variance recursion.
const BACKCAST_WINDOW: usize = 75;

/// Decay of the backcast weights.
const BACKCAST_DECAY: f64 = 0.94;

/// Number of fitted parameters (μ, ω, α, β).
const PARAMETER_COUNT: f64 = 4.0;

/// GARCH(1,1) parameters in percent-return units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GarchParams {
    /// Constant mean return.
    pub mu: f64,
    /// Variance intercept ω > 0.
    pub omega: f64,
    /// ARCH coefficient α ≥ 0.
    pub alpha: f64,
    /// GARCH coefficient β ≥ 0.
    pub beta: f64,
}

impl GarchParams {
    /// Returns `α + β`. Below one the process is covariance stationary.
    #[must_use]
    pub fn persistence(&self) -> f64 {
        self.alpha + self.beta
    }

    /// Unconditional variance `ω / (1 - α - β)`, if the process is stationary.
    #[must_use]
    pub fn long_run_variance(&self) -> Option<f64> {
        let gap = 1.0 - self.persistence();
        (gap > 0.0).then(|| self.omega / gap)
    }

    /// Runs the variance recursion over percent returns.
    ///
    /// Returns the conditional variance of every observation followed by the
    /// forecast for the next one, so the output is one longer than the input.
    #[must_use]
    pub fn conditional_variances(&self, returns_pct: &[f64]) -> Vec<f64> {
        let mut variances = Vec::with_capacity(returns_pct.len() + 1);
        let mut variance = backcast(returns_pct, self.mu);
        for r in returns_pct {
            variances.push(variance);
            let shock = r - self.mu;
            variance = self.omega + self.alpha * shock * shock + self.beta * variance;
        }
        variances.push(variance);
        variances
    }

    /// Gaussian log-likelihood of percent returns.
    #[must_use]
    pub fn log_likelihood(&self, returns_pct: &[f64]) -> f64 {
        let ln_two_pi = (2.0 * std::f64::consts::PI).ln();
        let variances = self.conditional_variances(returns_pct);

        let mut total = 0.0;
        for (r, variance) in returns_pct.iter().zip(&variances) {
            if !(variance.is_finite() && *variance > 0.0) {
                return f64::NEG_INFINITY;
            }
            let shock = r - self.mu;
            total -= 0.5 * (ln_two_pi + variance.ln() + shock * shock / variance);
        }
        total
    }

    /// Maps unconstrained optimizer coordinates onto valid parameters.
    ///
    /// `θ = [μ, ln ω, logit(α + β), logit(α / (α + β))]`
    fn from_unconstrained(theta: &[f64]) -> Self {
        let persistence = logistic(theta[2]);
        let share = logistic(theta[3]);
        Self {
            mu: theta[0],
            omega: theta[1].exp(),
            alpha: persistence * share,
            beta: persistence * (1.0 - share),
        }
    }
}

/// A fitted GARCH(1,1) model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GarchFit {
    /// Fitted parameters (percent-return units).
    pub params: GarchParams,
    /// Number of log returns fitted.
    pub observations: usize,
    /// Maximized log-likelihood of the percent returns.
    pub log_likelihood: f64,
    /// Forecast variance for the next day (percent² units).
    pub next_variance: f64,
    /// Optimizer iterations used.
    pub iterations: u32,
    /// Whether the optimizer met its tolerance.
    pub converged: bool,
}

impl GarchFit {
    /// Forecast next-day volatility of log returns.
    #[must_use]
    pub fn daily_volatility(&self) -> f64 {
        self.next_variance.sqrt() / RETURN_SCALE
    }

    /// Akaike information criterion.
    #[must_use]
    pub fn aic(&self) -> f64 {
        2.0 * PARAMETER_COUNT - 2.0 * self.log_likelihood
    }

    /// Bayesian information criterion.
    #[must_use]
    pub fn bic(&self) -> f64 {
        PARAMETER_COUNT * (self.observations as f64).ln() - 2.0 * self.log_likelihood
    }
}

/// Fits a GARCH(1,1) model to daily log returns with default settings.
///
/// # Errors
///
/// - `MathError::InsufficientData` with fewer than [`MIN_GARCH_RETURNS`] returns
/// - `MathError::InvalidInput` if the returns are constant
/// - `MathError::NonFinite` if a return or the forecast is not finite
pub fn fit_garch(returns: &[f64]) -> MathResult<GarchFit> {
    fit_garch_with(returns, &OptimizationConfig::default())
}

/// Fits a GARCH(1,1) model with explicit optimizer settings.
pub fn fit_garch_with(returns: &[f64], config: &OptimizationConfig) -> MathResult<GarchFit> {
    if returns.len() < MIN_GARCH_RETURNS {
        return Err(MathError::insufficient_data(MIN_GARCH_RETURNS, returns.len()));
    }
    if returns.iter().any(|r| !r.is_finite()) {
        return Err(MathError::non_finite("log return"));
    }

    let scaled: Vec<f64> = returns.iter().map(|r| r * RETURN_SCALE).collect();
    let sample_mean = mean(&scaled)?;
    let sample_variance = population_variance(&scaled)?;
    if sample_variance <= 0.0 {
        return Err(MathError::invalid_input(
            "returns",
            "constant returns have no conditional variance to fit",
        ));
    }

    // Start from a typical daily fit: persistence 0.95 with α = 0.10
    let start_persistence: f64 = 0.95;
    let initial = [
        sample_mean,
        (sample_variance * (1.0 - start_persistence)).ln(),
        logit(start_persistence),
        logit(0.10 / start_persistence),
    ];

    let objective =
        |theta: &[f64]| -GarchParams::from_unconstrained(theta).log_likelihood(&scaled);
    let result = nelder_mead(objective, &initial, config)?;

    let params = GarchParams::from_unconstrained(&result.parameters);
    let next_variance = params
        .conditional_variances(&scaled)
        .last()
        .copied()
        .unwrap_or(f64::NAN);
    if !(next_variance.is_finite() && next_variance >= 0.0) {
        return Err(MathError::non_finite("GARCH variance forecast"));
    }

    if !result.converged {
        log::warn!(
            "GARCH fit stopped after {} iterations without converging",
            result.iterations
        );
    }
    log::debug!(
        "GARCH(1,1) fit: omega={:.6} alpha={:.4} beta={:.4} ll={:.3}",
        params.omega,
        params.alpha,
        params.beta,
        -result.objective_value
    );

    Ok(GarchFit {
        params,
        observations: returns.len(),
        log_likelihood: -result.objective_value,
        next_variance,
        iterations: result.iterations,
        converged: result.converged,
    })
}

/// Exponentially weighted mean of squared residuals over the first
/// observations, used as the initial conditional variance.
fn backcast(returns_pct: &[f64], mu: f64) -> f64 {
    let window = returns_pct.len().min(BACKCAST_WINDOW);
    let mut weight = 1.0;
    let mut weight_sum = 0.0;
    let mut total = 0.0;
    for r in &returns_pct[..window] {
        let shock = r - mu;
        total += weight * shock * shock;
        weight_sum += weight;
        weight *= BACKCAST_DECAY;
    }
    if weight_sum > 0.0 {
        total / weight_sum
    } else {
        0.0
    }
}

fn logistic(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

fn logit(p: f64) -> f64 {
    (p / (1.0 - p)).ln()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// Deterministic normal draws (64-bit LCG with Box-Muller).
    struct Draws(u64);

    impl Draws {
        fn uniform(&mut self) -> f64 {
            self.0 = self
                .0
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            (self.0 >> 11) as f64 / (1u64 << 53) as f64
        }

        fn normal(&mut self) -> f64 {
            let u1 = 1.0 - self.uniform();
            let u2 = self.uniform();
            (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos()
        }
    }

    /// Log returns of a GARCH(1,1) process with ω = 0.05, α = 0.10, β = 0.85
    /// in percent units.
    fn simulated_returns(n: usize, seed: u64) -> Vec<f64> {
        let (omega, alpha, beta) = (0.05, 0.10, 0.85);
        let mut draws = Draws(seed);
        let mut variance: f64 = omega / (1.0 - alpha - beta);
        (0..n)
            .map(|_| {
                let shock = variance.sqrt() * draws.normal();
                variance = omega + alpha * shock * shock + beta * variance;
                shock / RETURN_SCALE
            })
            .collect()
    }

    #[test]
    fn test_recovers_simulated_parameters() {
        let returns = simulated_returns(2000, 42);
        let fit = fit_garch(&returns).unwrap();

        assert!(fit.converged);
        assert_eq!(fit.observations, 2000);
        assert!((fit.params.alpha - 0.10).abs() < 0.04, "alpha = {}", fit.params.alpha);
        assert!((fit.params.beta - 0.85).abs() < 0.05, "beta = {}", fit.params.beta);
        assert!((fit.params.omega - 0.05).abs() < 0.03, "omega = {}", fit.params.omega);
    }

    #[test]
    fn test_fit_beats_true_parameters() {
        let returns = simulated_returns(2000, 42);
        let scaled: Vec<f64> = returns.iter().map(|r| r * RETURN_SCALE).collect();
        let fit = fit_garch(&returns).unwrap();

        let truth = GarchParams {
            mu: 0.0,
            omega: 0.05,
            alpha: 0.10,
            beta: 0.85,
        };
        assert!(fit.log_likelihood >= truth.log_likelihood(&scaled));
        assert_relative_eq!(
            fit.log_likelihood,
            fit.params.log_likelihood(&scaled),
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_parameters_are_admissible() {
        for seed in [7, 11, 19] {
            let fit = fit_garch(&simulated_returns(500, seed)).unwrap();
            assert!(fit.params.omega > 0.0);
            assert!(fit.params.alpha >= 0.0);
            assert!(fit.params.beta >= 0.0);
            assert!(fit.params.persistence() < 1.0);
            assert!(fit.params.long_run_variance().is_some());
        }
    }

    #[test]
    fn test_forecast_is_next_step_of_recursion() {
        let returns = simulated_returns(500, 11);
        let scaled: Vec<f64> = returns.iter().map(|r| r * RETURN_SCALE).collect();
        let fit = fit_garch(&returns).unwrap();

        let variances = fit.params.conditional_variances(&scaled);
        assert_eq!(variances.len(), scaled.len() + 1);

        let last = scaled.len() - 1;
        let shock = scaled[last] - fit.params.mu;
        let expected = fit.params.omega
            + fit.params.alpha * shock * shock
            + fit.params.beta * variances[last];
        assert_relative_eq!(fit.next_variance, expected, max_relative = 1e-12);
        assert_relative_eq!(fit.daily_volatility(), expected.sqrt() / 100.0, max_relative = 1e-12);
    }

    #[test]
    fn test_information_criteria() {
        let fit = fit_garch(&simulated_returns(500, 7)).unwrap();
        assert_relative_eq!(fit.aic(), 8.0 - 2.0 * fit.log_likelihood);
        assert_relative_eq!(fit.bic(), 4.0 * 500f64.ln() - 2.0 * fit.log_likelihood);
        assert!(fit.bic() > fit.aic());
    }

    #[test]
    fn test_too_few_returns() {
        let err = fit_garch(&[0.01; 5]).unwrap_err();
        assert_eq!(err, MathError::insufficient_data(MIN_GARCH_RETURNS, 5));
    }

    #[test]
    fn test_constant_returns() {
        let err = fit_garch(&[0.01; 50]).unwrap_err();
        assert!(matches!(err, MathError::InvalidInput { .. }));
    }

    #[test]
    fn test_non_finite_return() {
        let mut returns = simulated_returns(50, 3);
        returns[10] = f64::NAN;
        assert_eq!(fit_garch(&returns).unwrap_err(), MathError::non_finite("log return"));
    }

    #[test]
    fn test_long_run_variance() {
        let params = GarchParams {
            mu: 0.0,
            omega: 0.05,
            alpha: 0.10,
            beta: 0.85,
        };
        assert_relative_eq!(params.long_run_variance().unwrap(), 1.0, max_relative = 1e-12);

        let explosive = GarchParams { beta: 0.95, ..params };
        assert!(explosive.long_run_variance().is_none());
    }
}
