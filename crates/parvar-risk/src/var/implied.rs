//! VaR from a quoted annualized volatility.

use parvar_core::{RiskParameters, VarError, VarResult};

use super::{ParametricVar, VaRReport, VolatilitySource};

/// Calendar days used to de-annualize a quoted volatility.
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Converts an annualized volatility in percent to a daily volatility.
///
/// `σ_daily = (pct / 100) / √365`
#[must_use]
pub fn daily_from_annual_pct(annual_volatility_pct: f64) -> f64 {
    (annual_volatility_pct / 100.0) / DAYS_PER_YEAR.sqrt()
}

impl ParametricVar {
    /// Estimates VaR from an annualized volatility quote (in percent).
    ///
    /// The yearly figure equals `collateral × z × pct / 100`.
    ///
    /// # Errors
    ///
    /// Returns `VarError::InvalidParameter` if the volatility is negative or
    /// not finite, plus the quantile and overflow errors of
    /// [`ParametricVar::estimate`].
    pub fn estimate_implied(
        &self,
        annual_volatility_pct: f64,
        params: &RiskParameters,
    ) -> VarResult<VaRReport> {
        if !annual_volatility_pct.is_finite() || annual_volatility_pct < 0.0 {
            return Err(VarError::invalid_parameter(
                "annual_volatility",
                format!("{annual_volatility_pct} must be a non-negative percentage"),
            ));
        }

        let source = VolatilitySource::Implied {
            annual_volatility_pct,
        };
        self.report(
            source,
            daily_from_annual_pct(annual_volatility_pct),
            self.model(),
            params,
        )
    }
}

/// Computes VaR from a quoted annualized volatility with the standard normal
/// multiplier.
pub fn implied_var(annual_volatility_pct: f64, params: &RiskParameters) -> VarResult<VaRReport> {
    ParametricVar::default().estimate_implied(annual_volatility_pct, params)
}
