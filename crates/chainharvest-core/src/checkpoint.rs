//! Checkpoint seams — persist and resume the harvester's position.
//!
//! The checkpoint is a single unix timestamp owned by the surrounding
//! application: the harvester reads it once at the start of a run and
//! writes it after every delivered page. It is the only state that
//! survives between runs.

use async_trait::async_trait;
use std::future::Future;
use std::sync::{Arc, Mutex};

use crate::error::HarvestError;

/// Reads the last successfully processed event timestamp.
#[async_trait]
pub trait CheckpointReader: Send + Sync {
    /// Returns the resume position, or `None` when the store has none.
    ///
    /// `Some(0)` is a valid position (harvest from the beginning of time);
    /// `None` rejects the run.
    async fn last_processed_timestamp(&self) -> Result<Option<i64>, HarvestError>;
}

/// Writes the last successfully processed event timestamp.
#[async_trait]
pub trait CheckpointWriter: Send + Sync {
    /// Called after every delivered page, with that page's highest timestamp.
    async fn set_last_processed_timestamp(&self, timestamp: i64) -> Result<(), HarvestError>;
}

/// Wrap an async closure as a [`CheckpointReader`].
pub fn reader_fn<F, Fut>(f: F) -> Arc<dyn CheckpointReader>
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Option<i64>, HarvestError>> + Send + 'static,
{
    Arc::new(FnReader(f))
}

/// Wrap an async closure as a [`CheckpointWriter`].
pub fn writer_fn<F, Fut>(f: F) -> Arc<dyn CheckpointWriter>
where
    F: Fn(i64) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), HarvestError>> + Send + 'static,
{
    Arc::new(FnWriter(f))
}

struct FnReader<F>(F);

#[async_trait]
impl<F, Fut> CheckpointReader for FnReader<F>
where
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = Result<Option<i64>, HarvestError>> + Send,
{
    async fn last_processed_timestamp(&self) -> Result<Option<i64>, HarvestError> {
        (self.0)().await
    }
}

struct FnWriter<F>(F);

#[async_trait]
impl<F, Fut> CheckpointWriter for FnWriter<F>
where
    F: Fn(i64) -> Fut + Send + Sync,
    Fut: Future<Output = Result<(), HarvestError>> + Send,
{
    async fn set_last_processed_timestamp(&self, timestamp: i64) -> Result<(), HarvestError> {
        (self.0)(timestamp).await
    }
}

// ─── In-memory store (for testing) ────────────────────────────────────────────

/// In-memory checkpoint store for tests and ephemeral harvesters.
///
/// All state is lost when the process exits.
#[derive(Default)]
pub struct MemoryCheckpointStore {
    timestamp: Mutex<Option<i64>>,
}

impl MemoryCheckpointStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds a resume position.
    pub fn starting_at(timestamp: i64) -> Self {
        Self {
            timestamp: Mutex::new(Some(timestamp)),
        }
    }

    /// The currently stored position, if any.
    pub fn current(&self) -> Option<i64> {
        *self.timestamp.lock().unwrap()
    }
}

#[async_trait]
impl CheckpointReader for MemoryCheckpointStore {
    async fn last_processed_timestamp(&self) -> Result<Option<i64>, HarvestError> {
        Ok(*self.timestamp.lock().unwrap())
    }
}

#[async_trait]
impl CheckpointWriter for MemoryCheckpointStore {
    async fn set_last_processed_timestamp(&self, timestamp: i64) -> Result<(), HarvestError> {
        *self.timestamp.lock().unwrap() = Some(timestamp);
        Ok(())
    }
}
