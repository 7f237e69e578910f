//! Holding-period horizon.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{VarError, VarResult};

/// Holding period over which a daily risk figure is reported.
///
/// Scaling follows the square-root-of-time rule from a daily base. The
/// monthly factor is `sqrt(12)`, a fixed convention rather than a calendar
/// month of trading days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Horizon {
    /// One day (factor 1)
    #[default]
    Daily,
    /// One month by convention (factor sqrt(12))
    Monthly,
    /// One year of calendar days (factor sqrt(365))
    Yearly,
}

impl Horizon {
    /// All horizons, shortest first.
    pub const ALL: [Horizon; 3] = [Horizon::Daily, Horizon::Monthly, Horizon::Yearly];

    /// Returns the number of daily periods the horizon spans.
    #[must_use]
    pub fn periods(&self) -> u32 {
        match self {
            Horizon::Daily => 1,
            Horizon::Monthly => 12,
            Horizon::Yearly => 365,
        }
    }

    /// Returns the square-root-of-time multiplier applied to a daily figure.
    #[must_use]
    pub fn scaling_factor(&self) -> f64 {
        match self {
            Horizon::Daily => 1.0,
            Horizon::Monthly => 12f64.sqrt(),
            Horizon::Yearly => 365f64.sqrt(),
        }
    }

    /// Resolves the numeric period codes used by older callers
    /// (`0` = daily, `1` = monthly, `2` = yearly).
    ///
    /// # Errors
    ///
    /// Returns `VarError::InvalidParameter` for any other code.
    pub fn from_code(code: i64) -> VarResult<Self> {
        match code {
            0 => Ok(Horizon::Daily),
            1 => Ok(Horizon::Monthly),
            2 => Ok(Horizon::Yearly),
            other => Err(VarError::invalid_parameter(
                "horizon",
                format!("unknown period code {other}; expected 0, 1 or 2"),
            )),
        }
    }

    /// Returns the numeric period code for this horizon.
    #[must_use]
    pub fn code(&self) -> i64 {
        match self {
            Horizon::Daily => 0,
            Horizon::Monthly => 1,
            Horizon::Yearly => 2,
        }
    }

    /// Returns the lowercase name used in configuration and on the command line.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Horizon::Daily => "daily",
            Horizon::Monthly => "monthly",
            Horizon::Yearly => "yearly",
        }
    }
}

impl fmt::Display for Horizon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Horizon {
    type Err = VarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "daily" | "day" | "1d" => Ok(Horizon::Daily),
            "monthly" | "month" | "1m" => Ok(Horizon::Monthly),
            "yearly" | "year" | "annual" | "1y" => Ok(Horizon::Yearly),
            other => Err(VarError::invalid_parameter(
                "horizon",
                format!("unknown horizon '{other}'; expected daily, monthly or yearly"),
            )),
        }
    }
}
