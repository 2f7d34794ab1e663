mod source;
mod state;

use std::path::PathBuf;

use thiserror::Error;

use crate::http::HttpError;

pub use source::StateLocation;
pub use state::{SUPPORTED_STATE_VERSION, TerraformState};

/// Errors reading or parsing the desired-state document.
#[derive(Debug, Error)]
pub enum StateError {
    #[error("state location is empty")]
    EmptyLocation,

    #[error("unsupported state location scheme '{scheme}://': {hint}")]
    UnsupportedScheme { scheme: String, hint: String },

    #[error("invalid S3 state location '{location}': expected s3://<bucket>/<key>")]
    InvalidS3Location { location: String },

    #[error("failed to read state file '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to fetch state: {0}")]
    Fetch(#[from] HttpError),

    #[error("failed to download state from '{location}': {message}")]
    S3 { location: String, message: String },

    #[error("failed to parse state: {message}")]
    Parse { message: String },

    #[error("unsupported state format version {found} (expected {})", SUPPORTED_STATE_VERSION)]
    UnsupportedVersion { found: u64 },
}
