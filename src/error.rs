use thiserror::Error;

/// Whole-run failures. Any of these aborts detection before a report exists.
#[derive(Debug, Error)]
pub enum TfDriftError {
    #[error(transparent)]
    State(#[from] crate::terraform::StateError),

    #[error(transparent)]
    Provider(#[from] crate::providers::ProviderError),

    #[error("failed to render report: {0}")]
    Render(#[from] serde_json::Error),
}
