use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use skyfare_core::{FlightSource, SearchQuery, SourceError};

/// Serves a static flight document from disk. The whole document is returned;
/// route and date narrowing happens in the orchestrator.
pub struct StaticFlightSource {
    pub path: PathBuf,
    pub delay: Duration,
}

impl StaticFlightSource {
    pub fn new(path: impl Into<PathBuf>, delay: Duration) -> Self {
        Self {
            path: path.into(),
            delay,
        }
    }
}

#[async_trait]
impl FlightSource for StaticFlightSource {
    async fn fetch(&self, _query: &SearchQuery) -> Result<serde_json::Value, SourceError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        tracing::debug!("Loading flight document from {}", self.path.display());
        let bytes = tokio::fs::read(&self.path).await.map_err(|e| {
            SourceError::Transport(format!("{}: {}", self.path.display(), e))
        })?;

        let payload: serde_json::Value = serde_json::from_slice(&bytes)?;
        Ok(payload)
    }

    fn name(&self) -> &'static str {
        "static"
    }
}
