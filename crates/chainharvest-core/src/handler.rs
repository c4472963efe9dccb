//! The consumer delivery seam.

use async_trait::async_trait;
use std::future::Future;
use std::sync::Arc;

use crate::error::HarvestError;
use crate::event::Event;

/// Receives each harvested page of events.
///
/// `highest_timestamp` is the timestamp of the page's last event — the value
/// the checkpoint advances to once delivery returns `Ok`. A delivery error
/// aborts the run before the checkpoint moves, so the page is replayed on
/// the next run.
#[async_trait]
pub trait EventHandler: Send + Sync {
    async fn on_events(
        &self,
        highest_timestamp: i64,
        events: Vec<Event>,
    ) -> Result<(), HarvestError>;
}

/// Wrap an async closure as an [`EventHandler`].
pub fn events_fn<F, Fut>(f: F) -> Arc<dyn EventHandler>
where
    F: Fn(i64, Vec<Event>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), HarvestError>> + Send + 'static,
{
    Arc::new(FnHandler(f))
}

struct FnHandler<F>(F);

#[async_trait]
impl<F, Fut> EventHandler for FnHandler<F>
where
    F: Fn(i64, Vec<Event>) -> Fut + Send + Sync,
    Fut: Future<Output = Result<(), HarvestError>> + Send,
{
    async fn on_events(
        &self,
        highest_timestamp: i64,
        events: Vec<Event>,
    ) -> Result<(), HarvestError> {
        (self.0)(highest_timestamp, events).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[tokio::test]
    async fn closure_handler_receives_pages() {
        let count = Arc::new(AtomicU32::new(0));

        let counter = count.clone();
        let handler = events_fn(move |highest, events| {
            let counter = counter.clone();
            async move {
                assert_eq!(highest, 12);
                assert_eq!(events.len(), 2);
                counter.fetch_add(1, Ordering::Relaxed);
                Ok(())
            }
        });

        let events = vec![
            Event {
                timestamp: Some(10),
                ..Default::default()
            },
            Event {
                timestamp: Some(12),
                ..Default::default()
            },
        ];
        handler.on_events(12, events).await.unwrap();

        assert_eq!(count.load(Ordering::Relaxed), 1);
    }

    #[tokio::test]
    async fn handler_errors_propagate() {
        let handler = events_fn(|_, _| async { Err(HarvestError::Handler("sink full".into())) });
        let err = handler.on_events(0, vec![]).await.unwrap_err();
        assert!(matches!(err, HarvestError::Handler(_)));
    }
}
