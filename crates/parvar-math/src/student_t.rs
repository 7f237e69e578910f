//! Maximum-likelihood fit of a location-scale Student-t distribution.

use serde::{Deserialize, Serialize};
use statrs::distribution::{Continuous, StudentsT};

use crate::error::{MathError, MathResult};
use crate::optimization::{nelder_mead, OptimizationConfig};
use crate::statistics::{mean, population_variance};

/// Fewest returns a Student-t fit accepts.
pub const MIN_FIT_RETURNS: usize = 10;

/// Lower bound on fitted degrees of freedom.
pub const MIN_DEGREES_OF_FREEDOM: f64 = 0.5;

/// Upper bound on fitted degrees of freedom. Beyond it the fit is
/// indistinguishable from a normal.
pub const MAX_DEGREES_OF_FREEDOM: f64 = 1_000.0;

/// Degrees of freedom the optimizer starts from.
const INITIAL_DEGREES_OF_FREEDOM: f64 = 5.0;

/// A fitted Student-t distribution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StudentTFit {
    /// Degrees of freedom ν.
    pub degrees_of_freedom: f64,
    /// Location.
    pub location: f64,
    /// Scale.
    pub scale: f64,
    /// Maximized log-likelihood of the data.
    pub log_likelihood: f64,
    /// Optimizer iterations used.
    pub iterations: u32,
    /// Whether the optimizer met its tolerance.
    pub converged: bool,
}

/// Fits ν, location and scale jointly by maximum likelihood.
///
/// The data are standardized before fitting; location and scale are
/// reported in the units of the input. ν is kept within
/// [`MIN_DEGREES_OF_FREEDOM`, `MAX_DEGREES_OF_FREEDOM`].
///
/// # Errors
///
/// - `MathError::InsufficientData` with fewer than [`MIN_FIT_RETURNS`] values
/// - `MathError::InvalidInput` if the values are constant
/// - `MathError::NonFinite` if a value is not finite
pub fn fit_student_t(values: &[f64]) -> MathResult<StudentTFit> {
    if values.len() < MIN_FIT_RETURNS {
        return Err(MathError::insufficient_data(MIN_FIT_RETURNS, values.len()));
    }
    if values.iter().any(|v| !v.is_finite()) {
        return Err(MathError::non_finite("student-t fit input"));
    }

    let centre = mean(values)?;
    let spread = population_variance(values)?.sqrt();
    if spread <= 0.0 {
        return Err(MathError::invalid_input(
            "returns",
            "constant values have no tail to fit",
        ));
    }
    let standardized: Vec<f64> = values.iter().map(|v| (v - centre) / spread).collect();

    // θ = [ln ν, location, ln scale] on the standardized data
    let objective = |theta: &[f64]| {
        let dof = theta[0].exp().clamp(MIN_DEGREES_OF_FREEDOM, MAX_DEGREES_OF_FREEDOM);
        match StudentsT::new(theta[1], theta[2].exp(), dof) {
            Ok(dist) => -standardized.iter().map(|z| dist.ln_pdf(*z)).sum::<f64>(),
            Err(_) => f64::INFINITY,
        }
    };
    let initial = [INITIAL_DEGREES_OF_FREEDOM.ln(), 0.0, 0.0];
    let result = nelder_mead(objective, &initial, &OptimizationConfig::default())?;

    let theta = &result.parameters;
    let degrees_of_freedom = theta[0]
        .exp()
        .clamp(MIN_DEGREES_OF_FREEDOM, MAX_DEGREES_OF_FREEDOM);
    // Undo the standardization: ln L(x) = ln L(z) - n ln s
    let log_likelihood = -result.objective_value - values.len() as f64 * spread.ln();

    log::debug!(
        "student-t fit: nu={:.4} iterations={} converged={}",
        degrees_of_freedom,
        result.iterations,
        result.converged
    );

    Ok(StudentTFit {
        degrees_of_freedom,
        location: centre + spread * theta[1],
        scale: spread * theta[2].exp(),
        log_likelihood,
        iterations: result.iterations,
        converged: result.converged,
    })
}
