use std::path::PathBuf;

use thiserror::Error;

use crate::http::HttpError;

/// AWS inventory errors.
///
/// SECURITY: Error messages must NEVER contain sensitive data like bearer tokens.
#[derive(Debug, Error)]
pub enum AwsError {
    /// Request failed after retries, or returned a non-success status
    #[error("inventory request failed: {0}")]
    Http(#[from] HttpError),

    #[error("failed to read inventory '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Inventory body is not a valid snapshot document
    #[error("invalid inventory snapshot: {message}")]
    Parse { message: String },

    #[error("unsupported inventory location '{location}'")]
    UnsupportedLocation { location: String },

    /// An AWS API call failed while collecting the live inventory
    #[error("{service} request failed: {message}")]
    Sdk { service: &'static str, message: String },

    /// Snapshot was exported from a different region than the one being checked
    #[error("inventory describes region '{found}' but '{expected}' was requested")]
    RegionMismatch { expected: String, found: String },
}

impl From<AwsError> for crate::providers::ProviderError {
    fn from(err: AwsError) -> Self {
        crate::providers::ProviderError::Aws(err.to_string())
    }
}
