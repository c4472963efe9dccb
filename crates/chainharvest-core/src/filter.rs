//! Filter for which indexed events to harvest.

use serde::{Deserialize, Serialize};

/// Server-side conditions applied to the first-page query.
///
/// At least one emitter address or event identifier must be set before a
/// run is accepted; an unbounded harvest over a shared index is rejected
/// up front.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventFilter {
    /// Only harvest events emitted by these addresses (empty = any address).
    pub emitter_addresses: Vec<String>,
    /// Only harvest events with these identifiers (empty = any identifier).
    pub event_identifiers: Vec<String>,
    /// Only harvest events recorded on this shard. Useful when a transfer
    /// logs on both the source and destination shard.
    pub shard_id: Option<u32>,
}

impl EventFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an emitter address condition.
    pub fn address(mut self, addr: impl Into<String>) -> Self {
        self.emitter_addresses.push(addr.into());
        self
    }

    /// Add an event identifier condition.
    pub fn identifier(mut self, id: impl Into<String>) -> Self {
        self.event_identifiers.push(id.into());
        self
    }

    /// Restrict the harvest to a single shard.
    pub fn shard(mut self, shard_id: u32) -> Self {
        self.shard_id = Some(shard_id);
        self
    }

    /// Returns `true` when neither addresses nor identifiers are set.
    pub fn is_unbounded(&self) -> bool {
        self.emitter_addresses.is_empty() && self.event_identifiers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_filter_is_unbounded() {
        assert!(EventFilter::new().is_unbounded());
        assert!(EventFilter::new().shard(1).is_unbounded()); // shard alone is not enough
    }

    #[test]
    fn address_or_identifier_bounds_the_filter() {
        assert!(!EventFilter::new().address("erd1abc").is_unbounded());
        assert!(!EventFilter::new().identifier("ESDTTransfer").is_unbounded());
    }

    #[test]
    fn fluent_accumulation() {
        let filter = EventFilter::new()
            .address("erd1abc")
            .address("erd1def")
            .identifier("swapTokensFixedInput")
            .shard(2);

        assert_eq!(filter.emitter_addresses.len(), 2);
        assert_eq!(filter.event_identifiers, vec!["swapTokensFixedInput"]);
        assert_eq!(filter.shard_id, Some(2));
    }
}
