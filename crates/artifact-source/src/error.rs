//! Error types for dataset loading.

use std::path::PathBuf;

use artifact_model::ModelError;
use thiserror::Error;

/// Every way the one-time dataset load can fail.
///
/// All variants are fatal: the caller never becomes interactive after one.
#[derive(Debug, Error)]
pub enum SourceError {
    // === Transport Errors ===
    /// Local file could not be read.
    #[error("failed to read dataset {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// HTTP client could not be built or the request did not complete.
    #[error("failed to fetch dataset {url}: {message}")]
    Network { url: String, message: String },

    /// Server answered with a non-success status.
    #[error("failed to fetch dataset {url}: HTTP status {status}")]
    HttpStatus { url: String, status: u16 },

    // === Payload Errors ===
    /// Payload is not JSON of the expected shape.
    #[error("dataset {location} is not a valid artifact document: {source}")]
    Parse {
        location: String,
        #[source]
        source: serde_json::Error,
    },

    /// Payload parsed but violates the dataset schema.
    #[error("dataset {location} failed validation: {source}")]
    Invalid {
        location: String,
        #[source]
        source: ModelError,
    },
}

/// Result type for loading operations.
pub type Result<T> = std::result::Result<T, SourceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SourceError::HttpStatus {
            url: "https://example.org/artifact_data.json".to_string(),
            status: 404,
        };
        assert_eq!(
            err.to_string(),
            "failed to fetch dataset https://example.org/artifact_data.json: HTTP status 404"
        );
    }

    #[test]
    fn test_invalid_wraps_model_error() {
        let err = SourceError::Invalid {
            location: "artifact_data.json".to_string(),
            source: ModelError::UnknownSlot("Flower".to_string()),
        };
        assert!(err.to_string().contains("unknown slot 'Flower'"));
    }
}
