//! The scrolling-search client seam.

use async_trait::async_trait;
use serde_json::Value;

use chainharvest_core::{Event, HarvestError};

/// One page of search results.
#[derive(Debug, Clone, Default)]
pub struct ScrollPage {
    /// Events in backend order — ascending by timestamp per the query's
    /// sort clause. Never re-sorted on this side.
    pub events: Vec<Event>,
    /// Continuation token, when the backend opened a scroll context.
    /// Its presence does not promise further data.
    pub scroll_id: Option<String>,
}

impl ScrollPage {
    /// An empty page is the harvest's termination signal.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

/// A search backend that supports cursor-based continuation ("scroll").
#[async_trait]
pub trait ScrollingClient: Send + Sync {
    /// Issue the initial search and open a scroll context.
    async fn search(&self, query: &Value) -> Result<ScrollPage, HarvestError>;

    /// Fetch the next page of a previously issued search.
    async fn scroll(&self, scroll_id: &str) -> Result<ScrollPage, HarvestError>;
}
