//! Price observations and series.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{VarError, VarResult};

/// Minimum number of price points needed to form one log return.
pub const MIN_OBSERVATIONS: usize = 2;

/// A single closing price observation.
///
/// The timestamp is informational; ordering is given by the position of
/// the observation in its [`PriceSeries`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Observation time, if the source provides one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    /// Closing price.
    pub close: f64,
}

impl PricePoint {
    /// Creates an untimestamped observation.
    #[must_use]
    pub fn new(close: f64) -> Self {
        Self {
            timestamp: None,
            close,
        }
    }

    /// Creates a timestamped observation.
    #[must_use]
    pub fn at(timestamp: DateTime<Utc>, close: f64) -> Self {
        Self {
            timestamp: Some(timestamp),
            close,
        }
    }
}

/// Time-ordered sequence of closing prices, oldest first.
///
/// The series is not validated on construction. Length and positivity are
/// checked by [`PriceSeries::validate`] and by the estimators, so that a
/// short or non-positive series is reported with its own error kind.
///
/// # Example
///
/// ```rust
/// use parvar_core::PriceSeries;
///
/// let series = PriceSeries::from_closes(&[100.0, 101.0, 99.0]);
/// assert_eq!(series.closes(), vec![100.0, 101.0, 99.0]);
/// assert!(series.validate().is_ok());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PriceSeries {
    points: Vec<PricePoint>,
}

impl PriceSeries {
    /// Creates a series from observations already in time order.
    #[must_use]
    pub fn new(points: Vec<PricePoint>) -> Self {
        Self { points }
    }

    /// Creates an untimestamped series from closing prices.
    #[must_use]
    pub fn from_closes(closes: &[f64]) -> Self {
        closes.iter().copied().map(PricePoint::new).collect()
    }

    /// Returns the observations.
    #[must_use]
    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    /// Returns the closing prices in order.
    #[must_use]
    pub fn closes(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.close).collect()
    }

    /// Returns the number of observations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns true if the series holds no observations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Returns the most recent observation.
    #[must_use]
    pub fn last(&self) -> Option<&PricePoint> {
        self.points.last()
    }

    /// Checks that the series can produce a log return series.
    ///
    /// # Errors
    ///
    /// - `VarError::InsufficientData` with fewer than two observations
    /// - `VarError::NonPositivePrice` for the first price that is not a
    ///   positive finite number
    pub fn validate(&self) -> VarResult<()> {
        if self.points.len() < MIN_OBSERVATIONS {
            return Err(VarError::insufficient_data(
                MIN_OBSERVATIONS,
                self.points.len(),
            ));
        }
        if let Some((index, point)) = self
            .points
            .iter()
            .enumerate()
            .find(|(_, p)| !(p.close.is_finite() && p.close > 0.0))
        {
            return Err(VarError::non_positive_price(index, point.close));
        }
        Ok(())
    }
}

impl FromIterator<PricePoint> for PriceSeries {
    fn from_iter<I: IntoIterator<Item = PricePoint>>(iter: I) -> Self {
        Self {
            points: iter.into_iter().collect(),
        }
    }
}

impl From<Vec<f64>> for PriceSeries {
    fn from(closes: Vec<f64>) -> Self {
        Self::from_closes(&closes)
    }
}
