//! # Parvar Core
//!
//! Core types and the error taxonomy for the Parvar value-at-risk library.
//!
//! This crate provides the foundational building blocks used throughout Parvar:
//!
//! - **Types**: Price observations and series, holding-period horizons,
//!   validated risk parameters
//! - **Errors**: The [`VarError`] taxonomy shared by every crate in the workspace
//!
//! ## Design Philosophy
//!
//! - **Type Safety**: Newtypes keep a risk level from being passed as collateral
//! - **Explicit Over Implicit**: Invalid parameters are rejected with a named error kind
//!
//! ## Example
//!
//! ```rust
//! use parvar_core::prelude::*;
//!
//! let series = PriceSeries::from_closes(&[100.0, 101.0, 99.0]);
//! let params = RiskParameters::new(0.01, 10_000.0, Horizon::Yearly).unwrap();
//!
//! assert_eq!(series.len(), 3);
//! assert!((params.risk_level().confidence() - 0.99).abs() < 1e-12);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::uninlined_format_args)]

pub mod error;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{VarError, VarResult};
    pub use crate::types::{Collateral, Horizon, PricePoint, PriceSeries, RiskLevel, RiskParameters};
}

// Re-export commonly used types at crate root
pub use error::{VarError, VarResult};
pub use types::{Collateral, Horizon, PricePoint, PriceSeries, RiskLevel, RiskParameters};
