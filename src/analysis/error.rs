//! Error types for the analysis functions.
//!
//! Only two conditions are hard errors: a malformed configuration value and a
//! request for a column the table does not have. Every other degenerate case
//! (empty series, insufficient sample size, zero variance) resolves to a
//! well-defined `None` result that callers check before use.

use thiserror::Error;

/// Errors surfaced by the analysis functions.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AnalysisError {
    /// Malformed configuration, e.g. an unknown CI method or a non-positive
    /// sample size.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Requested column is absent from the dataset.
    #[error("column '{0}' not found in dataset")]
    InvalidColumn(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_argument_display() {
        let err = AnalysisError::InvalidArgument("n must be positive".to_string());
        assert_eq!(err.to_string(), "invalid argument: n must be positive");
    }

    #[test]
    fn test_invalid_column_display() {
        let err = AnalysisError::InvalidColumn("Class".to_string());
        assert_eq!(err.to_string(), "column 'Class' not found in dataset");
    }
}
