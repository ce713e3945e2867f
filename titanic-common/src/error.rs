//! Error types for the Titanic Q&A service.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using the service error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for the Titanic Q&A service.
///
/// Only `DataNotFound` and `EmptyDataset` are fatal: they abort startup
/// before the HTTP server binds. Everything else is caught at the query
/// handler boundary and reported as answer text.
#[derive(Error, Debug)]
pub enum Error {
    /// Dataset file missing at the configured path (fatal at startup)
    #[error("Titanic dataset not found at {0}")]
    DataNotFound(PathBuf),

    /// Dataset loaded but contains no rows (fatal at startup)
    #[error("Titanic dataset is empty")]
    EmptyDataset,

    /// Column name not present in the dataset
    #[error("Unknown column: {0}")]
    UnknownColumn(String),

    /// Numeric operation requested on a non-numeric column
    #[error("Column is not numeric: {0}")]
    NotNumeric(String),

    /// Chart rendering failed
    #[error("Chart rendering failed: {0}")]
    Chart(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// CSV parse error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Check whether this error must abort startup.
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::DataNotFound(_) | Self::EmptyDataset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::UnknownColumn("Cabin2".to_string());
        assert_eq!(err.to_string(), "Unknown column: Cabin2");

        let err = Error::DataNotFound(PathBuf::from("data/titanic.csv"));
        assert_eq!(err.to_string(), "Titanic dataset not found at data/titanic.csv");
    }

    #[test]
    fn test_fatal_classification() {
        assert!(Error::DataNotFound(PathBuf::from("x")).is_fatal());
        assert!(Error::EmptyDataset.is_fatal());
        assert!(!Error::UnknownColumn("Age".into()).is_fatal());
        assert!(!Error::Chart("no values".into()).is_fatal());
    }
}
