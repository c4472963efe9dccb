//! The harvested event record.

use serde::{Deserialize, Serialize};

/// A log event as stored in the search index.
///
/// Every field is optional — the index is free to omit any of them, and the
/// harvester never interprets payloads. `timestamp` is the sole ordering and
/// checkpoint key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Event {
    #[serde(rename = "originalTxHash")]
    pub original_tx_hash: Option<String>,
    #[serde(rename = "logAddress")]
    pub log_address: Option<String>,
    /// Event identifier (e.g. `"ESDTTransfer"`).
    pub identifier: Option<String>,
    /// Address of the contract that emitted the event.
    pub address: Option<String>,
    pub topics: Option<Vec<String>>,
    #[serde(rename = "shardID")]
    pub shard_id: Option<u32>,
    #[serde(rename = "additionalData")]
    pub additional_data: Option<Vec<String>>,
    /// Order of the event within its transaction.
    #[serde(rename = "txOrder")]
    pub tx_order: Option<u32>,
    #[serde(rename = "txHash")]
    pub tx_hash: Option<String>,
    /// Order of the event within its block.
    pub order: Option<u32>,
    /// Unix timestamp assigned by the index; the checkpoint advances to the
    /// last event's timestamp after each delivered page.
    pub timestamp: Option<i64>,
}

impl Event {
    /// Returns the timestamp, falling back to `0` when the index omitted it.
    pub fn timestamp_or_zero(&self) -> i64 {
        self.timestamp.unwrap_or(0)
    }
}
