use thiserror::Error;

#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("No Tokio runtime available for event delivery: {0}")]
    NoRuntime(#[from] tokio::runtime::TryCurrentError),
    #[error("Failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}
