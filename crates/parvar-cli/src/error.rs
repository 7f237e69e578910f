//! CLI error types.

use std::path::PathBuf;

use thiserror::Error;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Input file format could not be determined.
    #[error("Cannot infer input format of {0}. Use --input-format json|csv.")]
    UnknownFormat(PathBuf),

    /// A price record could not be read.
    #[error("Invalid price record {index}: {reason}")]
    InvalidRecord {
        /// Zero-based record position.
        index: usize,
        /// What was wrong with the record.
        reason: String,
    },

    /// The closing price column is missing from a CSV header.
    #[error("Column '{0}' not found in CSV header")]
    MissingColumn(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        CliError::Serialization(err.to_string())
    }
}

impl From<csv::Error> for CliError {
    fn from(err: csv::Error) -> Self {
        CliError::Serialization(err.to_string())
    }
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
