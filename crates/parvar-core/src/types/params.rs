//! Validated risk parameters.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::Horizon;
use crate::error::{VarError, VarResult};

/// Tail probability of the loss distribution, strictly between 0 and 1.
///
/// A risk level of `0.01` corresponds to 99% confidence.
///
/// # Example
///
/// ```rust
/// use parvar_core::RiskLevel;
///
/// let alpha = RiskLevel::new(0.05).unwrap();
/// assert!((alpha.confidence() - 0.95).abs() < 1e-12);
/// assert!(RiskLevel::new(1.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct RiskLevel(f64);

impl RiskLevel {
    /// Creates a risk level, rejecting values outside the open interval (0, 1).
    ///
    /// # Errors
    ///
    /// Returns `VarError::InvalidParameter` if `alpha` is not finite or not
    /// strictly between 0 and 1.
    pub fn new(alpha: f64) -> VarResult<Self> {
        if !alpha.is_finite() || alpha <= 0.0 || alpha >= 1.0 {
            return Err(VarError::invalid_parameter(
                "risk_level",
                format!("{alpha} must be strictly between 0 and 1"),
            ));
        }
        Ok(Self(alpha))
    }

    /// Returns the tail probability.
    #[must_use]
    pub fn alpha(&self) -> f64 {
        self.0
    }

    /// Returns the confidence level `1 - alpha`.
    #[must_use]
    pub fn confidence(&self) -> f64 {
        1.0 - self.0
    }
}

impl TryFrom<f64> for RiskLevel {
    type Error = VarError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<RiskLevel> for f64 {
    fn from(level: RiskLevel) -> Self {
        level.0
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Notional amount exposed to risk. Must be positive and finite.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Collateral(f64);

impl Collateral {
    /// Creates a collateral amount.
    ///
    /// # Errors
    ///
    /// Returns `VarError::InvalidParameter` if `amount` is zero, negative,
    /// NaN or infinite.
    pub fn new(amount: f64) -> VarResult<Self> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(VarError::invalid_parameter(
                "collateral",
                format!("{amount} must be positive and finite"),
            ));
        }
        Ok(Self(amount))
    }

    /// Returns the amount.
    #[must_use]
    pub fn amount(&self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for Collateral {
    type Error = VarError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Collateral> for f64 {
    fn from(collateral: Collateral) -> Self {
        collateral.0
    }
}

impl fmt::Display for Collateral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Risk level, collateral and horizon for one estimate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskParameters {
    risk_level: RiskLevel,
    collateral: Collateral,
    horizon: Horizon,
}

impl RiskParameters {
    /// Validates and bundles the parameters of an estimate.
    ///
    /// The risk level is checked first, then the collateral.
    pub fn new(risk_level: f64, collateral: f64, horizon: Horizon) -> VarResult<Self> {
        Ok(Self {
            risk_level: RiskLevel::new(risk_level)?,
            collateral: Collateral::new(collateral)?,
            horizon,
        })
    }

    /// Bundles already validated parameters.
    #[must_use]
    pub fn from_parts(risk_level: RiskLevel, collateral: Collateral, horizon: Horizon) -> Self {
        Self {
            risk_level,
            collateral,
            horizon,
        }
    }

    /// Returns the risk level.
    #[must_use]
    pub fn risk_level(&self) -> RiskLevel {
        self.risk_level
    }

    /// Returns the collateral.
    #[must_use]
    pub fn collateral(&self) -> Collateral {
        self.collateral
    }

    /// Returns the horizon.
    #[must_use]
    pub fn horizon(&self) -> Horizon {
        self.horizon
    }

    /// Returns a copy with a different horizon.
    #[must_use]
    pub fn with_horizon(mut self, horizon: Horizon) -> Self {
        self.horizon = horizon;
        self
    }
}
