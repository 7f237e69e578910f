//! Error types for the Parvar library.
//!
//! Every failure of a value-at-risk computation is reported as one of the
//! kinds below. There are no partial results: an estimate either completes
//! or fails with the first error encountered.

use thiserror::Error;

/// A specialized Result type for Parvar operations.
pub type VarResult<T> = Result<T, VarError>;

/// The main error type for Parvar operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum VarError {
    /// Too few price points to form a single log return.
    #[error("Insufficient data: need at least {required} price points, got {actual}")]
    InsufficientData {
        /// Minimum number of price points.
        required: usize,
        /// Number of price points supplied.
        actual: usize,
    },

    /// A risk parameter is outside its valid domain.
    #[error("Invalid parameter `{name}`: {reason}")]
    InvalidParameter {
        /// Name of the offending parameter.
        name: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// A price observation is zero, negative or not a number.
    #[error("Non-positive price {value} at index {index}: log return is undefined")]
    NonPositivePrice {
        /// Position of the observation in the series.
        index: usize,
        /// The offending closing price.
        value: f64,
    },

    /// An intermediate or final figure came out as NaN or infinite.
    #[error("Non-finite value produced while computing {stage}")]
    NonFiniteResult {
        /// The computation stage that produced the value.
        stage: String,
    },
}

impl VarError {
    /// Creates an insufficient data error.
    #[must_use]
    pub fn insufficient_data(required: usize, actual: usize) -> Self {
        Self::InsufficientData { required, actual }
    }

    /// Creates an invalid parameter error.
    #[must_use]
    pub fn invalid_parameter(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Creates a non-positive price error.
    #[must_use]
    pub fn non_positive_price(index: usize, value: f64) -> Self {
        Self::NonPositivePrice { index, value }
    }

    /// Creates a non-finite result error.
    #[must_use]
    pub fn non_finite(stage: impl Into<String>) -> Self {
        Self::NonFiniteResult {
            stage: stage.into(),
        }
    }

    /// Returns the stable name of the error kind.
    ///
    /// These names are what callers and the command-line front end report.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InsufficientData { .. } => "InsufficientDataError",
            Self::InvalidParameter { .. } => "InvalidParameterError",
            Self::NonPositivePrice { .. } => "NonPositivePriceError",
            Self::NonFiniteResult { .. } => "NonFiniteResultError",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = VarError::insufficient_data(2, 1);
        assert!(err.to_string().contains("at least 2"));
        assert!(err.to_string().contains("got 1"));
    }

    #[test]
    fn test_invalid_parameter_display() {
        let err = VarError::invalid_parameter("risk_level", "must be in (0, 1)");
        assert_eq!(
            err.to_string(),
            "Invalid parameter `risk_level`: must be in (0, 1)"
        );
    }

    #[test]
    fn test_error_kinds() {
        assert_eq!(
            VarError::insufficient_data(2, 0).kind(),
            "InsufficientDataError"
        );
        assert_eq!(
            VarError::invalid_parameter("x", "y").kind(),
            "InvalidParameterError"
        );
        assert_eq!(
            VarError::non_positive_price(3, 0.0).kind(),
            "NonPositivePriceError"
        );
        assert_eq!(VarError::non_finite("volatility").kind(), "NonFiniteResultError");
    }
}
