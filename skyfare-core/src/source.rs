use async_trait::async_trait;

use crate::search::SearchQuery;

/// Anything that can answer a flight search with a raw JSON payload.
///
/// The payload is decoded by the caller, so a source that returns the wrong
/// shape is reported as malformed rather than failing here.
#[async_trait]
pub trait FlightSource: Send + Sync {
    async fn fetch(&self, query: &SearchQuery) -> Result<serde_json::Value, SourceError>;

    /// Short label used in logs.
    fn name(&self) -> &'static str;
}

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("Transport failure: {0}")]
    Transport(String),

    #[error("Flight source unavailable: {0}")]
    Unavailable(String),

    #[error("Payload could not be decoded: {0}")]
    Decode(String),
}

impl From<std::io::Error> for SourceError {
    fn from(err: std::io::Error) -> Self {
        SourceError::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for SourceError {
    fn from(err: serde_json::Error) -> Self {
        SourceError::Decode(err.to_string())
    }
}
