//! Left-tail quantile multipliers.
//!
//! A multiplier is the negated quantile of a zero-centred distribution at
//! the tail probability `alpha`, so a deeper tail (smaller `alpha`) gives a
//! larger positive number.

use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, Normal, StudentsT};
use std::fmt;

use crate::error::{MathError, MathResult};
use crate::student_t::fit_student_t;

/// How a risk level is mapped to a quantile multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "model", rename_all = "snake_case")]
pub enum QuantileModel {
    /// Standard normal: `-Φ⁻¹(alpha)`.
    #[default]
    Normal,
    /// Student-t with the given degrees of freedom: `-T⁻¹(alpha; ν)`.
    StudentT {
        /// Degrees of freedom ν, positive and finite.
        degrees_of_freedom: f64,
    },
    /// Student-t whose degrees of freedom are fitted by maximum likelihood
    /// to the log returns being evaluated. Must be resolved against data
    /// with [`QuantileModel::resolve`] before a multiplier can be taken.
    FittedStudentT,
    /// Reproduces legacy arithmetic where the "quantile" of the one-element
    /// sample `[alpha]` was taken, giving a multiplier of `-alpha`.
    ///
    /// Only for matching figures produced by that code path. The resulting
    /// VaR is negative and does not grow as the tail deepens.
    LegacyLiteral,
}

impl QuantileModel {
    /// Creates a Student-t model.
    #[must_use]
    pub fn student_t(degrees_of_freedom: f64) -> Self {
        Self::StudentT { degrees_of_freedom }
    }

    /// Returns true if the model needs return data before use.
    #[must_use]
    pub fn needs_fit(&self) -> bool {
        matches!(self, QuantileModel::FittedStudentT)
    }

    /// Binds the model to a return series.
    ///
    /// `FittedStudentT` becomes `StudentT` with the fitted ν; every other
    /// model is returned unchanged.
    ///
    /// # Errors
    ///
    /// Propagates the errors of [`fit_student_t`].
    pub fn resolve(&self, returns: &[f64]) -> MathResult<QuantileModel> {
        match self {
            QuantileModel::FittedStudentT => {
                let fit = fit_student_t(returns)?;
                Ok(QuantileModel::student_t(fit.degrees_of_freedom))
            }
            other => Ok(*other),
        }
    }

    /// Returns the multiplier for tail probability `alpha`.
    ///
    /// # Errors
    ///
    /// - `MathError::InvalidInput` if `alpha` is not strictly between 0 and 1
    ///   or the degrees of freedom are not positive and finite
    /// - `MathError::Distribution` if the distribution cannot be built
    /// - `MathError::NonFinite` if the quantile is not finite
    pub fn multiplier(&self, alpha: f64) -> MathResult<f64> {
        match *self {
            QuantileModel::Normal => Ok(-standard_normal_quantile(alpha)?),
            QuantileModel::StudentT { degrees_of_freedom } => {
                Ok(-student_t_quantile(alpha, degrees_of_freedom)?)
            }
            QuantileModel::FittedStudentT => Err(MathError::invalid_input(
                "quantile_model",
                "fitted student-t needs a return series to fit",
            )),
            QuantileModel::LegacyLiteral => {
                check_probability(alpha)?;
                Ok(-alpha)
            }
        }
    }

    /// Returns a short name for display.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            QuantileModel::Normal => "normal",
            QuantileModel::StudentT { .. } => "student-t",
            QuantileModel::FittedStudentT => "student-t(fitted)",
            QuantileModel::LegacyLiteral => "legacy",
        }
    }
}

impl fmt::Display for QuantileModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuantileModel::StudentT { degrees_of_freedom } => {
                write!(f, "student-t(ν={degrees_of_freedom})")
            }
            other => f.write_str(other.name()),
        }
    }
}

/// Inverse CDF of the standard normal distribution.
///
/// # Example
///
/// ```rust
/// use parvar_math::quantile::standard_normal_quantile;
///
/// let q = standard_normal_quantile(0.01).unwrap();
/// assert!((q + 2.326347874040841).abs() < 1e-9);
/// ```
pub fn standard_normal_quantile(p: f64) -> MathResult<f64> {
    check_probability(p)?;
    let normal = Normal::new(0.0, 1.0).map_err(|e| MathError::Distribution {
        reason: e.to_string(),
    })?;
    finite(normal.inverse_cdf(p), "normal quantile")
}

/// Inverse CDF of the standard Student-t distribution.
pub fn student_t_quantile(p: f64, degrees_of_freedom: f64) -> MathResult<f64> {
    check_probability(p)?;
    if !degrees_of_freedom.is_finite() || degrees_of_freedom <= 0.0 {
        return Err(MathError::invalid_input(
            "degrees_of_freedom",
            format!("{degrees_of_freedom} must be positive and finite"),
        ));
    }
    let dist = StudentsT::new(0.0, 1.0, degrees_of_freedom).map_err(|e| {
        MathError::Distribution {
            reason: e.to_string(),
        }
    })?;
    finite(dist.inverse_cdf(p), "student-t quantile")
}

fn check_probability(p: f64) -> MathResult<()> {
    if !p.is_finite() || p <= 0.0 || p >= 1.0 {
        return Err(MathError::invalid_input(
            "risk_level",
            format!("{p} must be strictly between 0 and 1"),
        ));
    }
    Ok(())
}

fn finite(value: f64, operation: &str) -> MathResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(MathError::non_finite(operation))
    }
}
