//! Search query construction.
//!
//! Builds the JSON query document for the first page of a harvest run.
//! Continuation pages carry no query: the backend's scroll context fixes
//! the filter for the lifetime of the run.

use serde_json::{json, Value};

use chainharvest_core::EventFilter;

/// Build the search document for events strictly newer than `since_timestamp`.
///
/// The timestamp boundary is serialized as a string, and results are always
/// requested in ascending timestamp order so the last event of every page is
/// that page's maximum.
pub fn build_query(since_timestamp: i64, filter: &EventFilter, page_size: usize) -> Value {
    let mut must = Vec::new();

    if !filter.event_identifiers.is_empty() {
        must.push(json!({
            "terms": {
                "identifier": filter.event_identifiers,
            },
        }));
    }

    if !filter.emitter_addresses.is_empty() {
        must.push(json!({
            "terms": {
                "address": filter.emitter_addresses,
            },
        }));
    }

    if let Some(shard_id) = filter.shard_id {
        must.push(json!({
            "term": {
                "shardID": shard_id,
            },
        }));
    }

    must.push(json!({
        "range": {
            "timestamp": {
                "gt": since_timestamp.to_string(),
            },
        },
    }));

    json!({
        "size": page_size,
        "query": {
            "bool": {
                "must": must,
            },
        },
        "sort": [
            {
                "timestamp": {
                    "order": "asc",
                },
            },
        ],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_filter_produces_all_clauses() {
        let filter = EventFilter::new()
            .address("erd1abc")
            .identifier("ESDTTransfer")
            .shard(1);

        let query = build_query(1000, &filter, 500);

        assert_eq!(query["size"], 500);
        let must = query["query"]["bool"]["must"].as_array().unwrap();
        assert_eq!(must.len(), 4);
        assert_eq!(must[0]["terms"]["identifier"][0], "ESDTTransfer");
        assert_eq!(must[1]["terms"]["address"][0], "erd1abc");
        assert_eq!(must[2]["term"]["shardID"], 1);
        assert_eq!(must[3]["range"]["timestamp"]["gt"], "1000");
        assert_eq!(query["sort"][0]["timestamp"]["order"], "asc");
    }

    #[test]
    fn empty_sets_omit_their_clauses() {
        let filter = EventFilter::new().address("erd1abc");
        let query = build_query(0, &filter, 10_000);

        let must = query["query"]["bool"]["must"].as_array().unwrap();
        assert_eq!(must.len(), 2); // address + range only
        assert!(must[0].get("terms").is_some());
        assert!(must[1].get("range").is_some());
    }

    #[test]
    fn timestamp_boundary_is_a_string() {
        let filter = EventFilter::new().identifier("x");
        let query = build_query(1727858320, &filter, 1);
        let gt = &query["query"]["bool"]["must"][1]["range"]["timestamp"]["gt"];
        assert!(gt.is_string());
        assert_eq!(gt, "1727858320");
    }

    #[test]
    fn deterministic_for_identical_input() {
        let filter = EventFilter::new().address("erd1abc").identifier("swap");
        assert_eq!(build_query(5, &filter, 100), build_query(5, &filter, 100));
    }
}
