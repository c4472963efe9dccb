//! Fluent builder API for creating event processors.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use chainharvest_core::{EventFilter, MemoryCheckpointStore};
//! use chainharvest_elastic::ProcessorBuilder;
//!
//! let store = Arc::new(MemoryCheckpointStore::starting_at(1727858320));
//! let processor = ProcessorBuilder::new()
//!     .elastic_url("https://index.multiversx.com")
//!     .filter(
//!         EventFilter::new()
//!             .address("erd1qqqqqqqqqqqqqpgqt0uek344kaerr4gf9g2r8l0f4l8ygyha2jps82u9r6")
//!             .identifier("swapTokensFixedInput"),
//!     )
//!     .page_size(1000)
//!     .checkpoint_store(store)
//!     .on_events(|highest, events| async move {
//!         println!("{} events up to {highest}", events.len());
//!         Ok(())
//!     })
//!     .build();
//! ```

use std::future::Future;
use std::sync::Arc;

use chainharvest_core::{
    events_fn, CheckpointReader, CheckpointWriter, Event, EventFilter, EventHandler,
    HarvestError, ProcessorConfig,
};

use crate::processor::EventProcessor;

/// Fluent builder for [`ProcessorConfig`] / [`EventProcessor`].
#[derive(Default)]
pub struct ProcessorBuilder {
    config: ProcessorConfig,
}

impl ProcessorBuilder {
    pub fn new() -> Self {
        Self {
            config: ProcessorConfig::default(),
        }
    }

    /// Set the base URL of the search index.
    pub fn elastic_url(mut self, url: impl Into<String>) -> Self {
        self.config.elastic_url = Some(url.into());
        self
    }

    /// Set the event filter (emitter addresses, identifiers, shard).
    pub fn filter(mut self, filter: EventFilter) -> Self {
        self.config.filter = filter;
        self
    }

    /// Set the number of events requested per page.
    pub fn page_size(mut self, size: usize) -> Self {
        self.config.page_size = size;
        self
    }

    /// Set the scroll-context keepalive passed through to the backend.
    pub fn scroll_timeout(mut self, timeout: impl Into<String>) -> Self {
        self.config.scroll_timeout = timeout.into();
        self
    }

    /// Set the pause between continuation requests, in milliseconds.
    pub fn delay_between_requests_ms(mut self, millis: u64) -> Self {
        self.config.delay_between_requests_ms = millis;
        self
    }

    /// Set the delivery handler.
    pub fn handler(mut self, handler: Arc<dyn EventHandler>) -> Self {
        self.config.handler = Some(handler);
        self
    }

    /// Set the delivery handler from an async closure.
    pub fn on_events<F, Fut>(self, f: F) -> Self
    where
        F: Fn(i64, Vec<Event>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), HarvestError>> + Send + 'static,
    {
        self.handler(events_fn(f))
    }

    /// Set the checkpoint reader.
    pub fn checkpoint_reader(mut self, reader: Arc<dyn CheckpointReader>) -> Self {
        self.config.checkpoint_reader = Some(reader);
        self
    }

    /// Set the checkpoint writer.
    pub fn checkpoint_writer(mut self, writer: Arc<dyn CheckpointWriter>) -> Self {
        self.config.checkpoint_writer = Some(writer);
        self
    }

    /// Use one store for both sides of the checkpoint seam.
    pub fn checkpoint_store<S>(mut self, store: Arc<S>) -> Self
    where
        S: CheckpointReader + CheckpointWriter + 'static,
    {
        self.config.checkpoint_reader = Some(store.clone());
        self.config.checkpoint_writer = Some(store);
        self
    }

    /// Build the configuration without wrapping it in a processor.
    pub fn build_config(self) -> ProcessorConfig {
        self.config
    }

    /// Build the [`EventProcessor`].
    pub fn build(self) -> EventProcessor {
        EventProcessor::new(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chainharvest_core::MemoryCheckpointStore;

    #[test]
    fn builder_defaults() {
        let config = ProcessorBuilder::new().build_config();
        assert_eq!(config.page_size, 10_000);
        assert_eq!(config.scroll_timeout, "1m");
        assert_eq!(config.delay_between_requests_ms, 100);
    }

    #[test]
    fn builder_custom() {
        let config = ProcessorBuilder::new()
            .elastic_url("https://index.example.com")
            .filter(EventFilter::new().identifier("ESDTTransfer").shard(1))
            .page_size(1000)
            .scroll_timeout("30s")
            .delay_between_requests_ms(0)
            .build_config();

        assert_eq!(config.elastic_url.as_deref(), Some("https://index.example.com"));
        assert_eq!(config.filter.event_identifiers, vec!["ESDTTransfer"]);
        assert_eq!(config.filter.shard_id, Some(1));
        assert_eq!(config.page_size, 1000);
        assert_eq!(config.scroll_timeout, "30s");
        assert_eq!(config.delay_between_requests_ms, 0);
    }

    #[test]
    fn checkpoint_store_wires_both_seams() {
        let store = Arc::new(MemoryCheckpointStore::starting_at(5));
        let config = ProcessorBuilder::new()
            .checkpoint_store(store)
            .on_events(|_, _| async { Ok(()) })
            .build_config();

        assert!(config.checkpoint_reader.is_some());
        assert!(config.checkpoint_writer.is_some());
        assert!(config.handler.is_some());
    }
}
