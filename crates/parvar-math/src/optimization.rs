//! Optimization algorithms.
//!
//! Derivative-free minimization used to fit volatility and distribution
//! parameters by maximum likelihood.

use crate::error::{MathError, MathResult};

/// Configuration for optimization algorithms.
#[derive(Debug, Clone, Copy)]
pub struct OptimizationConfig {
    /// Relative tolerance on the spread of objective values in the simplex.
    /// The simplex must also be narrower than `tolerance.sqrt()`.
    pub tolerance: f64,
    /// Maximum number of iterations.
    pub max_iterations: u32,
    /// Edge length of the initial simplex.
    pub step_size: f64,
}

impl Default for OptimizationConfig {
    fn default() -> Self {
        Self {
            tolerance: 1e-8,
            max_iterations: 5_000,
            step_size: 0.1,
        }
    }
}

/// Result of an optimization run.
#[derive(Debug, Clone)]
pub struct OptimizationResult {
    /// Optimal parameters found.
    pub parameters: Vec<f64>,
    /// Final objective function value.
    pub objective_value: f64,
    /// Number of iterations used.
    pub iterations: u32,
    /// Whether the optimization converged.
    pub converged: bool,
}

/// Nelder-Mead simplex minimizer.
///
/// Non-finite objective values are treated as `+∞`, so an objective can
/// reject infeasible points by returning NaN or infinity.
///
/// # Errors
///
/// - `MathError::InvalidInput` if `initial` is empty
/// - `MathError::NonFinite` if the objective is not finite at `initial`
///
/// # Example
///
/// ```rust
/// use parvar_math::optimization::{nelder_mead, OptimizationConfig};
///
/// let f = |p: &[f64]| (p[0] - 1.0).powi(2) + (p[1] + 2.0).powi(2);
/// let result = nelder_mead(f, &[0.0, 0.0], &OptimizationConfig::default()).unwrap();
/// assert!(result.converged);
/// assert!((result.parameters[0] - 1.0).abs() < 1e-3);
/// ```
pub fn nelder_mead<F>(
    f: F,
    initial: &[f64],
    config: &OptimizationConfig,
) -> MathResult<OptimizationResult>
where
    F: Fn(&[f64]) -> f64,
{
    let n = initial.len();
    if n == 0 {
        return Err(MathError::invalid_input("initial", "no parameters to optimize"));
    }

    let eval = |x: &[f64]| {
        let value = f(x);
        if value.is_finite() {
            value
        } else {
            f64::INFINITY
        }
    };

    let mut simplex: Vec<(Vec<f64>, f64)> = Vec::with_capacity(n + 1);
    simplex.push((initial.to_vec(), eval(initial)));
    if !simplex[0].1.is_finite() {
        return Err(MathError::non_finite("objective at initial point"));
    }
    for i in 0..n {
        let mut vertex = initial.to_vec();
        vertex[i] += config.step_size;
        let value = eval(&vertex);
        simplex.push((vertex, value));
    }

    let x_tolerance = config.tolerance.sqrt();

    for iteration in 0..config.max_iterations {
        simplex.sort_by(|a, b| a.1.total_cmp(&b.1));

        let best = simplex[0].1;
        let f_spread = (simplex[n].1 - best).abs();
        let x_spread = simplex[1..]
            .iter()
            .flat_map(|(x, _)| x.iter().zip(&simplex[0].0).map(|(a, b)| (a - b).abs()))
            .fold(0.0_f64, f64::max);

        if f_spread <= config.tolerance * (1.0 + best.abs()) && x_spread <= x_tolerance {
            return Ok(finish(simplex, iteration, true));
        }

        // Centroid of every vertex but the worst
        let mut centroid = vec![0.0; n];
        for (x, _) in &simplex[..n] {
            for (c, xi) in centroid.iter_mut().zip(x) {
                *c += xi;
            }
        }
        for c in &mut centroid {
            *c /= n as f64;
        }

        let worst = simplex[n].0.clone();
        let along = |t: f64| -> Vec<f64> {
            centroid
                .iter()
                .zip(&worst)
                .map(|(c, w)| c + t * (c - w))
                .collect()
        };

        let reflected = along(1.0);
        let f_reflected = eval(&reflected);

        if f_reflected < best {
            let expanded = along(2.0);
            let f_expanded = eval(&expanded);
            simplex[n] = if f_expanded < f_reflected {
                (expanded, f_expanded)
            } else {
                (reflected, f_reflected)
            };
            continue;
        }

        if f_reflected < simplex[n - 1].1 {
            simplex[n] = (reflected, f_reflected);
            continue;
        }

        if f_reflected < simplex[n].1 {
            let contracted = along(0.5);
            let f_contracted = eval(&contracted);
            if f_contracted <= f_reflected {
                simplex[n] = (contracted, f_contracted);
                continue;
            }
        } else {
            let contracted = along(-0.5);
            let f_contracted = eval(&contracted);
            if f_contracted < simplex[n].1 {
                simplex[n] = (contracted, f_contracted);
                continue;
            }
        }

        // Shrink towards the best vertex
        let anchor = simplex[0].0.clone();
        for (x, value) in &mut simplex[1..] {
            for (xi, a) in x.iter_mut().zip(&anchor) {
                *xi = a + 0.5 * (*xi - a);
            }
            *value = eval(x.as_slice());
        }
    }

    simplex.sort_by(|a, b| a.1.total_cmp(&b.1));
    Ok(finish(simplex, config.max_iterations, false))
}

fn finish(simplex: Vec<(Vec<f64>, f64)>, iterations: u32, converged: bool) -> OptimizationResult {
    let (parameters, objective_value) = simplex.into_iter().next().unwrap_or_default();
    OptimizationResult {
        parameters,
        objective_value,
        iterations,
        converged,
    }
}
