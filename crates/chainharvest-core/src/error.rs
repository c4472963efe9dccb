//! Error types for the harvesting pipeline.

use thiserror::Error;

/// Errors that can occur while configuring or running a harvest.
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("no emitter addresses or event identifiers set; cannot harvest without filters")]
    NoFilters,

    #[error("no checkpoint reader configured for the last processed timestamp")]
    MissingCheckpointReader,

    #[error("checkpoint reader did not resolve a last processed timestamp")]
    UnresolvedCheckpoint,

    #[error("no search index URL configured")]
    MissingElasticUrl,

    #[error("no event handler configured")]
    MissingHandler,

    #[error("no checkpoint writer configured for the last processed timestamp")]
    MissingCheckpointWriter,

    #[error("error while fetching events from {url}: {reason}")]
    Fetch { url: String, reason: String },

    #[error("handler error: {0}")]
    Handler(String),

    #[error("checkpoint store error: {0}")]
    Checkpoint(String),
}

impl HarvestError {
    /// Returns `true` if the error was raised during validation, before any
    /// network access.
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            Self::NoFilters
                | Self::MissingCheckpointReader
                | Self::UnresolvedCheckpoint
                | Self::MissingElasticUrl
                | Self::MissingHandler
                | Self::MissingCheckpointWriter
        )
    }
}
