//! Error types for lakegap.
//!
//! This crate provides:
//! - [`AnalyzerError`] - Top-level error enum for analysis runs
//! - [`AccessError`] - Storage access failures (listing, fetch)
//! - [`SampleError`] - Sample preview decode failures
//!
//! An access failure is terminal for the run it occurred in: a partial key
//! listing could silently understate missing partitions, so the analyzer
//! never computes a result from incomplete data.

use thiserror::Error;

/// Top-level error type for lakegap.
#[derive(Error, Debug)]
pub enum AnalyzerError {
    /// Storage access errors (listing, object fetch)
    #[error("Access error: {0}")]
    Access(#[from] AccessError),

    /// Sample preview errors (decode)
    #[error("Sample error: {0}")]
    Sample(#[from] SampleError),

    /// Configuration errors (invalid path, bad arguments)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic errors (wrapped anyhow)
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Storage access errors.
///
/// Raised when the listing or fetch capability fails. These are never
/// retried internally; retries, if desired, belong to the caller.
#[derive(Error, Debug)]
pub enum AccessError {
    /// Authorization failure (403 and friends)
    #[error("Access denied: {0}")]
    Denied(String),

    /// Bucket or key does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Network or service fault
    #[error("Network error: {0}")]
    Network(String),
}

/// Sample preview errors.
#[derive(Error, Debug)]
pub enum SampleError {
    /// File extension is not one of csv/parquet/json
    #[error("Unrecognized file format: {0}")]
    UnrecognizedFormat(String),

    /// The file bytes could not be decoded as the detected format
    #[error("Decode failed for {key}: {reason}")]
    Decode { key: String, reason: String },
}

/// Result type alias using AnalyzerError.
pub type Result<T> = std::result::Result<T, AnalyzerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_error_display() {
        let err = AnalyzerError::Access(AccessError::Denied("bucket 'data'".to_string()));
        assert!(err.to_string().contains("Access denied"));
    }

    #[test]
    fn test_access_error_conversion() {
        fn fails() -> Result<()> {
            Err(AccessError::NotFound("s3://bucket/prefix".to_string()))?
        }
        let err = fails().unwrap_err();
        assert!(matches!(err, AnalyzerError::Access(AccessError::NotFound(_))));
    }

    #[test]
    fn test_sample_decode_display() {
        let err = SampleError::Decode {
            key: "data/file.parquet".to_string(),
            reason: "bad magic".to_string(),
        };
        assert!(err.to_string().contains("data/file.parquet"));
        assert!(err.to_string().contains("bad magic"));
    }

    #[test]
    fn test_config_error_display() {
        let err = AnalyzerError::Config("expected s3:// path".to_string());
        assert!(err.to_string().contains("Configuration error"));
    }
}
