//! HTTP scrolling client backed by `reqwest`.
//!
//! First pages go to `{base}/events/_search?scroll={timeout}`, continuation
//! pages to `{base}/_search/scroll`. A 2xx body that does not carry the
//! expected `hits.hits` shape is normalized to an empty page, which ends
//! the harvest cleanly; transport failures and non-2xx statuses are fatal.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;

use chainharvest_core::{Event, HarvestError};

use crate::scroll::{ScrollPage, ScrollingClient};

/// Client for an Elasticsearch-compatible events index.
pub struct HttpScrollClient {
    base_url: String,
    scroll_timeout: String,
    http: reqwest::Client,
}

impl HttpScrollClient {
    /// Create a client for the given index base URL.
    ///
    /// `scroll_timeout` is the context-keepalive window passed through to
    /// the backend on the initial search (e.g. `"1m"`).
    pub fn new(base_url: impl Into<String>, scroll_timeout: impl Into<String>) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("failed to build reqwest client");

        Self {
            base_url: base_url.into(),
            scroll_timeout: scroll_timeout.into(),
            http,
        }
    }

    async fn post_page(&self, url: &str, body: &Value) -> Result<ScrollPage, HarvestError> {
        let resp = self
            .http
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| HarvestError::Fetch {
                url: url.to_string(),
                reason: e.to_string(),
            })?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(HarvestError::Fetch {
                url: url.to_string(),
                reason: format!("HTTP {status}: {body}"),
            });
        }

        let text = resp.text().await.map_err(|e| HarvestError::Fetch {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(parse_page(&text))
    }
}

#[async_trait]
impl ScrollingClient for HttpScrollClient {
    async fn search(&self, query: &Value) -> Result<ScrollPage, HarvestError> {
        let url = format!(
            "{}/events/_search?scroll={}",
            self.base_url, self.scroll_timeout
        );
        self.post_page(&url, query).await
    }

    async fn scroll(&self, scroll_id: &str) -> Result<ScrollPage, HarvestError> {
        let url = format!("{}/_search/scroll", self.base_url);
        self.post_page(&url, &json!({ "scroll_id": scroll_id })).await
    }
}

// ─── Response normalization ──────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SearchResponse {
    #[serde(rename = "_scroll_id")]
    scroll_id: Option<String>,
    hits: Option<HitsEnvelope>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct HitsEnvelope {
    hits: Option<Vec<Hit>>,
}

#[derive(Debug, Deserialize)]
struct Hit {
    #[serde(rename = "_source", default)]
    source: Event,
}

/// Normalize a response body into a page.
///
/// Anything that does not deserialize into the expected hit envelope is an
/// empty page without a token, not an error — the drain loop treats it as
/// exhaustion.
fn parse_page(body: &str) -> ScrollPage {
    let parsed: SearchResponse = match serde_json::from_str(body) {
        Ok(parsed) => parsed,
        Err(e) => {
            tracing::warn!(error = %e, "response is not a search result; treating as empty page");
            return ScrollPage::default();
        }
    };

    let Some(hits) = parsed.hits.and_then(|envelope| envelope.hits) else {
        tracing::warn!("response has no hit list; treating as empty page");
        return ScrollPage::default();
    };

    ScrollPage {
        events: hits.into_iter().map(|hit| hit.source).collect(),
        scroll_id: parsed.scroll_id,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hits_and_scroll_id() {
        let page = parse_page(
            r#"{
                "_scroll_id": "c2Nyb2xs",
                "hits": {
                    "total": { "value": 2 },
                    "hits": [
                        { "_source": { "identifier": "ESDTTransfer", "timestamp": 10 } },
                        { "_source": { "identifier": "ESDTTransfer", "timestamp": 11 } }
                    ]
                }
            }"#,
        );

        assert_eq!(page.events.len(), 2);
        assert_eq!(page.events[1].timestamp, Some(11));
        assert_eq!(page.scroll_id.as_deref(), Some("c2Nyb2xs"));
    }

    #[test]
    fn empty_hit_list_keeps_scroll_id() {
        let page = parse_page(r#"{ "_scroll_id": "abc", "hits": { "hits": [] } }"#);
        assert!(page.is_empty());
        assert_eq!(page.scroll_id.as_deref(), Some("abc"));
    }

    #[test]
    fn non_json_body_is_an_empty_page() {
        let page = parse_page("upstream proxy said something HTML-shaped");
        assert!(page.is_empty());
        assert!(page.scroll_id.is_none());
    }

    #[test]
    fn missing_hit_list_is_an_empty_page() {
        assert!(parse_page(r#"{ "took": 3 }"#).is_empty());
        assert!(parse_page(r#"{ "hits": {} }"#).is_empty());
        assert!(parse_page(r#"{ "hits": "gone" }"#).is_empty());
    }

    #[test]
    fn hit_without_source_becomes_empty_event() {
        let page = parse_page(r#"{ "hits": { "hits": [ {} ] } }"#);
        assert_eq!(page.events.len(), 1);
        assert!(page.events[0].timestamp.is_none());
    }
}
