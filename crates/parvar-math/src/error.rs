//! Error types for mathematical operations.

use parvar_core::VarError;
use thiserror::Error;

/// A specialized Result type for mathematical operations.
pub type MathResult<T> = Result<T, MathError>;

/// Errors that can occur during mathematical operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    /// Insufficient data points for operation.
    #[error("Insufficient data: need at least {required}, got {actual}")]
    InsufficientData {
        /// Minimum required points.
        required: usize,
        /// Actual number of points.
        actual: usize,
    },

    /// A value that feeds a logarithm or ratio is not strictly positive.
    #[error("Non-positive value {value} at index {index}")]
    NonPositiveValue {
        /// Position of the value in its input.
        index: usize,
        /// The offending value.
        value: f64,
    },

    /// Invalid input parameter.
    #[error("Invalid input `{parameter}`: {reason}")]
    InvalidInput {
        /// Name of the parameter.
        parameter: String,
        /// Description of the invalid input.
        reason: String,
    },

    /// Distribution could not be constructed.
    #[error("Distribution error: {reason}")]
    Distribution {
        /// Message from the distribution library.
        reason: String,
    },

    /// Operation produced NaN or an infinity.
    #[error("Non-finite result in {operation}")]
    NonFinite {
        /// The operation that produced the value.
        operation: String,
    },
}

impl MathError {
    /// Creates an insufficient data error.
    #[must_use]
    pub fn insufficient_data(required: usize, actual: usize) -> Self {
        Self::InsufficientData { required, actual }
    }

    /// Creates an invalid input error.
    #[must_use]
    pub fn invalid_input(parameter: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            parameter: parameter.into(),
            reason: reason.into(),
        }
    }

    /// Creates a non-finite error.
    #[must_use]
    pub fn non_finite(operation: impl Into<String>) -> Self {
        Self::NonFinite {
            operation: operation.into(),
        }
    }
}

impl From<MathError> for VarError {
    fn from(err: MathError) -> Self {
        match err {
            MathError::InsufficientData { required, actual } => {
                VarError::insufficient_data(required, actual)
            }
            MathError::NonPositiveValue { index, value } => {
                VarError::non_positive_price(index, value)
            }
            MathError::InvalidInput { parameter, reason } => {
                VarError::invalid_parameter(parameter, reason)
            }
            MathError::Distribution { reason } => VarError::invalid_parameter("quantile_model", reason),
            MathError::NonFinite { operation } => VarError::non_finite(operation),
        }
    }
}
