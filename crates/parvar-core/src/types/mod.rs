//! Domain types for value-at-risk estimation.
//!
//! - [`PricePoint`]: A single closing price, optionally timestamped
//! - [`PriceSeries`]: Time-ordered closing prices
//! - [`Horizon`]: Holding period selector with its square-root-of-time factor
//! - [`RiskLevel`]: Tail probability in (0, 1)
//! - [`Collateral`]: Positive notional exposed to risk
//! - [`RiskParameters`]: The three parameters bundled and validated

mod horizon;
mod params;
mod series;

pub use horizon::Horizon;
pub use params::{Collateral, RiskLevel, RiskParameters};
pub use series::{PricePoint, PriceSeries, MIN_OBSERVATIONS};
