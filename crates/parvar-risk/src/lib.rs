//! # parvar-risk
//!
//! Parametric value-at-risk from a historical series of daily closing prices.
//!
//! This crate provides:
//!
//! - **Historical volatility VaR**: log returns, population volatility, a
//!   left-tail quantile multiplier and square-root-of-time scaling
//! - **Implied volatility VaR**: the same figure driven by a quoted
//!   annualized volatility
//! - **Batch evaluation**: independent requests evaluated in parallel
//!
//! ## Example
//!
//! ```rust
//! use parvar_risk::prelude::*;
//!
//! let prices = [100.0, 101.0, 99.0, 102.0, 98.0, 100.0];
//! let var = compute_var(&prices, 0.01, 10_000.0, Horizon::Yearly).unwrap();
//! assert!((var - 11_587.763359466944).abs() < 1e-4);
//! ```

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

pub mod batch;
pub mod var;

pub use parvar_core::{VarError, VarResult};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::batch::{evaluate_batch, BatchResult, VaRRequest};
    pub use crate::var::*;
    pub use parvar_core::prelude::*;
    pub use parvar_math::QuantileModel;
}
