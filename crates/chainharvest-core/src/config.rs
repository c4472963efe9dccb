//! Processor configuration.

use std::fmt;
use std::sync::Arc;

use crate::checkpoint::{CheckpointReader, CheckpointWriter};
use crate::filter::EventFilter;
use crate::handler::EventHandler;

/// Configuration for one event processor.
///
/// Construct with [`ProcessorConfig::default`] and struct update syntax, or
/// through the fluent `ProcessorBuilder` in `chainharvest-elastic`. Unset
/// fields keep their documented defaults; validation happens when a run
/// starts, never at construction.
#[derive(Clone)]
pub struct ProcessorConfig {
    /// Base URL of the search index to harvest from.
    pub elastic_url: Option<String>,
    /// Which events to harvest. At least one emitter address or event
    /// identifier must be set before a run is accepted.
    pub filter: EventFilter,
    /// Events requested per page. Defaults to `10_000`.
    pub page_size: usize,
    /// How long the backend keeps the scroll context alive between
    /// continuation requests; passed through verbatim. Defaults to `"1m"`.
    pub scroll_timeout: String,
    /// Pause between consecutive continuation requests, in milliseconds.
    /// `0` disables the pause. Useful against rate-limited public indexes.
    /// Defaults to `100`.
    pub delay_between_requests_ms: u64,
    /// Delivery callback, invoked once per harvested page.
    pub handler: Option<Arc<dyn EventHandler>>,
    /// Reads the resume position at the start of a run.
    pub checkpoint_reader: Option<Arc<dyn CheckpointReader>>,
    /// Persists the new position after each delivered page.
    pub checkpoint_writer: Option<Arc<dyn CheckpointWriter>>,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            elastic_url: None,
            filter: EventFilter::default(),
            page_size: 10_000,
            scroll_timeout: "1m".into(),
            delay_between_requests_ms: 100,
            handler: None,
            checkpoint_reader: None,
            checkpoint_writer: None,
        }
    }
}

impl fmt::Debug for ProcessorConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProcessorConfig")
            .field("elastic_url", &self.elastic_url)
            .field("filter", &self.filter)
            .field("page_size", &self.page_size)
            .field("scroll_timeout", &self.scroll_timeout)
            .field("delay_between_requests_ms", &self.delay_between_requests_ms)
            .field("handler", &self.handler.is_some())
            .field("checkpoint_reader", &self.checkpoint_reader.is_some())
            .field("checkpoint_writer", &self.checkpoint_writer.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documented_defaults() {
        let config = ProcessorConfig::default();
        assert_eq!(config.page_size, 10_000);
        assert_eq!(config.scroll_timeout, "1m");
        assert_eq!(config.delay_between_requests_ms, 100);
        assert!(config.elastic_url.is_none());
        assert!(config.filter.is_unbounded());
        assert!(config.handler.is_none());
    }

    #[test]
    fn partial_construction_keeps_defaults() {
        let config = ProcessorConfig {
            elastic_url: Some("https://index.example.com".into()),
            filter: EventFilter::new().identifier("ESDTTransfer"),
            ..Default::default()
        };
        assert_eq!(config.page_size, 10_000);
        assert_eq!(config.delay_between_requests_ms, 100);
        assert!(!config.filter.is_unbounded());
    }
}
