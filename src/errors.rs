//! Error types for MediChain
//!
//! Load-time and training-time failures are fatal to startup; per-query
//! failures reject only the query that caused them.

use thiserror::Error;

/// Main error type for the MediChain pipeline
#[derive(Error, Debug)]
pub enum MediError {
    /// Malformed input table or missing required column
    #[error("Data error in {table} table: {reason}")]
    DataError { table: String, reason: String },

    /// Empty or invalid feature matrix, or invalid settings
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// Query vector does not match the trained feature set
    #[error("Dimension mismatch: expected {expected} symptoms, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Query carried no symptom at all
    #[error("No symptoms selected: select at least one symptom to get a prediction")]
    NoSymptomsSelected,

    /// Symptom name not present in the trained features
    #[error("Unknown symptom: {0}")]
    UnknownSymptom(String),

    /// Query input that cannot be read as a symptom vector
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// CSV reader errors
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl MediError {
    /// Build a data error for the named table
    pub fn data(table: &str, reason: impl Into<String>) -> Self {
        MediError::DataError {
            table: table.to_string(),
            reason: reason.into(),
        }
    }

    /// Whether this error only rejects a single query
    pub fn is_query_error(&self) -> bool {
        matches!(
            self,
            MediError::DimensionMismatch { .. }
                | MediError::NoSymptomsSelected
                | MediError::UnknownSymptom(_)
                | MediError::InvalidQuery(_)
        )
    }
}

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, MediError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = MediError::DimensionMismatch {
            expected: 12,
            actual: 3,
        };
        assert!(err.to_string().contains("12"));
        assert!(err.to_string().contains("3"));
    }

    #[test]
    fn test_data_error_names_table() {
        let err = MediError::data("precaution", "missing column 'Disease'");
        assert!(err.to_string().contains("precaution"));
        assert!(err.to_string().contains("Disease"));
    }

    #[test]
    fn test_query_errors() {
        assert!(MediError::NoSymptomsSelected.is_query_error());
        assert!(MediError::UnknownSymptom("rash".to_string()).is_query_error());
        assert!(!MediError::ConfigurationError("empty".to_string()).is_query_error());
    }
}
