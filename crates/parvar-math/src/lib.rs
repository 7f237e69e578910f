//! # Parvar Math
//!
//! Mathematical utilities for the Parvar value-at-risk library.
//!
//! This crate provides:
//!
//! - **Statistics**: Log returns, mean, population variance and volatility
//! - **Quantiles**: Left-tail multipliers from the standard normal and
//!   Student-t distributions, with a maximum-likelihood fit of ν
//! - **GARCH(1,1)**: Conditional volatility fitted by maximum likelihood
//! - **Optimization**: Nelder-Mead minimization for the likelihood fits
//!
//! ## Design Philosophy
//!
//! - **Numerical Stability**: Non-positive prices and non-finite values are
//!   reported as errors instead of flowing through as NaN
//! - **Determinism**: Reductions run in input order, so identical inputs
//!   give bit-identical outputs

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::unreadable_literal)]
#![allow(clippy::uninlined_format_args)]

pub mod error;
pub mod garch;
pub mod optimization;
pub mod quantile;
pub mod statistics;
pub mod student_t;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{MathError, MathResult};
    pub use crate::garch::{fit_garch, GarchFit, GarchParams};
    pub use crate::optimization::{nelder_mead, OptimizationConfig, OptimizationResult};
    pub use crate::quantile::{standard_normal_quantile, student_t_quantile, QuantileModel};
    pub use crate::statistics::{
        log_returns, mean, population_variance, volatility, ReturnStats,
    };
    pub use crate::student_t::{fit_student_t, StudentTFit};
}

pub use error::{MathError, MathResult};
pub use garch::{GarchFit, GarchParams};
pub use quantile::QuantileModel;
pub use statistics::ReturnStats;
