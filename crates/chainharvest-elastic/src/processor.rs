//! The processor façade and checkpoint-advancing drain loop.
//!
//! One `start` call performs one full drain: resolve the checkpoint, pull
//! the first page, then follow the scroll context until the backend returns
//! an empty page. Every delivered page advances the checkpoint, so an
//! aborted run resumes at the last delivered page on the next call.

use std::sync::Arc;
use std::time::Duration;

use chainharvest_core::{
    CheckpointReader, CheckpointWriter, Event, EventHandler, HarvestError, ProcessorConfig,
};

use crate::http::HttpScrollClient;
use crate::query::build_query;
use crate::scroll::{ScrollPage, ScrollingClient};

/// Harvests events from a search index and delivers them to the configured
/// handler in ascending timestamp order.
pub struct EventProcessor {
    config: ProcessorConfig,
}

impl EventProcessor {
    pub fn new(config: ProcessorConfig) -> Self {
        Self { config }
    }

    /// Run one drain-to-empty harvest.
    ///
    /// Validates the configuration, resolves the resume position, then
    /// pulls pages until the backend reports no more events. Callers that
    /// need continuous polling invoke `start` again, e.g. on a timer;
    /// concurrent runs against the same checkpoint store must be
    /// serialized by the caller.
    pub async fn start(&self) -> Result<(), HarvestError> {
        let run = self.prepare().await?;
        let client = HttpScrollClient::new(run.url.clone(), self.config.scroll_timeout.clone());
        self.drain(&client, &run).await
    }

    /// Fail-fast validation in fixed precedence, before any network access.
    ///
    /// The checkpoint read sits between the presence checks: a reader that
    /// resolves to `None` rejects the run even though `Some(0)` would be a
    /// perfectly valid resume position.
    async fn prepare(&self) -> Result<HarvestRun, HarvestError> {
        if self.config.filter.is_unbounded() {
            return Err(HarvestError::NoFilters);
        }

        let reader = self
            .config
            .checkpoint_reader
            .as_ref()
            .ok_or(HarvestError::MissingCheckpointReader)?;
        let since = reader
            .last_processed_timestamp()
            .await?
            .ok_or(HarvestError::UnresolvedCheckpoint)?;

        let url = self
            .config
            .elastic_url
            .clone()
            .ok_or(HarvestError::MissingElasticUrl)?;
        let handler = self
            .config
            .handler
            .clone()
            .ok_or(HarvestError::MissingHandler)?;
        let writer = self
            .config
            .checkpoint_writer
            .clone()
            .ok_or(HarvestError::MissingCheckpointWriter)?;

        Ok(HarvestRun {
            since,
            url,
            handler,
            writer,
        })
    }

    /// Pull pages from `client` until one comes back empty.
    async fn drain<C: ScrollingClient>(
        &self,
        client: &C,
        run: &HarvestRun,
    ) -> Result<(), HarvestError> {
        tracing::info!(since = run.since, "starting harvest");

        let query = build_query(run.since, &self.config.filter, self.config.page_size);
        let ScrollPage { events, scroll_id } = client.search(&query).await?;

        if events.is_empty() {
            tracing::info!("no new events past the checkpoint");
            return Ok(());
        }

        let mut pages = 1u64;
        let mut delivered = events.len() as u64;
        run.deliver(events).await?;

        // The first response's scroll id drives the whole run; ids on
        // continuation responses are ignored.
        let Some(scroll_id) = scroll_id else {
            tracing::info!(pages, events = delivered, "harvest complete");
            return Ok(());
        };

        let delay = Duration::from_millis(self.config.delay_between_requests_ms);
        loop {
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }

            let page = client.scroll(&scroll_id).await?;
            if page.is_empty() {
                break;
            }

            pages += 1;
            delivered += page.events.len() as u64;
            run.deliver(page.events).await?;
        }

        tracing::info!(pages, events = delivered, "harvest complete");
        Ok(())
    }
}

/// Context for one validated run.
struct HarvestRun {
    since: i64,
    url: String,
    handler: Arc<dyn EventHandler>,
    writer: Arc<dyn CheckpointWriter>,
}

impl HarvestRun {
    /// Deliver one page, then advance the checkpoint.
    ///
    /// Delivery completes before the checkpoint moves: a failed delivery
    /// leaves the page replayable on the next run. The last event of the
    /// page is authoritative for the new position — pages arrive pre-sorted
    /// and are never re-sorted here.
    async fn deliver(&self, events: Vec<Event>) -> Result<(), HarvestError> {
        let highest = events.last().map(Event::timestamp_or_zero).unwrap_or(0);
        tracing::debug!(count = events.len(), highest, "delivering page");

        self.handler.on_events(highest, events).await?;
        self.writer.set_last_processed_timestamp(highest).await?;
        Ok(())
    }
}
