//! Background refresh for [`ResourceCache`]s.

use std::sync::Arc;
use std::time::Duration;

use assetrack_core::change::ChangeEvent;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::cache::ResourceCache;

/// Shortest accepted refresh period.
pub const MIN_REFRESH_PERIOD: Duration = Duration::from_secs(5);
/// Longest accepted refresh period.
pub const MAX_REFRESH_PERIOD: Duration = Duration::from_secs(300);

/// Refresh `cache` every `period` and whenever a change event for its table
/// arrives on `changes`. Runs until `cancel` fires.
///
/// `period` is clamped to [`MIN_REFRESH_PERIOD`]..=[`MAX_REFRESH_PERIOD`].
/// The first refresh happens immediately. Failures are recorded in the
/// cache state and the loop keeps going.
pub fn spawn_refresh<T>(
    cache: Arc<ResourceCache<T>>,
    period: Duration,
    changes: Option<broadcast::Receiver<ChangeEvent>>,
    cancel: CancellationToken,
) -> JoinHandle<()>
where
    T: Send + Sync + 'static,
{
    let period = period.clamp(MIN_REFRESH_PERIOD, MAX_REFRESH_PERIOD);
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        let mut changes = changes;
        tracing::debug!(
            table = cache.table(),
            period_secs = period.as_secs(),
            "Cache refresh started"
        );

        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = interval.tick() => {
                    let _ = cache.refresh().await;
                }
                feed = next_change(&mut changes) => match feed {
                    Feed::Event(event) if event.table == cache.table() => {
                        tracing::trace!(
                            table = %event.table,
                            record_id = event.record_id,
                            "Change-driven refresh"
                        );
                        let _ = cache.refresh().await;
                        interval.reset();
                    }
                    Feed::Event(_) => {}
                    // Missed events may have touched this table.
                    Feed::Lagged => {
                        let _ = cache.refresh().await;
                        interval.reset();
                    }
                    // Feed gone; keep polling on the interval alone.
                    Feed::Closed => changes = None,
                }
            }
        }
        tracing::debug!(table = cache.table(), "Cache refresh stopped");
    })
}

enum Feed {
    Event(ChangeEvent),
    Lagged,
    Closed,
}

/// Next item from the feed; pends forever when there is no feed.
async fn next_change(changes: &mut Option<broadcast::Receiver<ChangeEvent>>) -> Feed {
    let Some(rx) = changes.as_mut() else {
        return std::future::pending().await;
    };
    match rx.recv().await {
        Ok(event) => Feed::Event(event),
        Err(broadcast::error::RecvError::Lagged(skipped)) => {
            tracing::warn!(skipped, "Change feed lagged");
            Feed::Lagged
        }
        Err(broadcast::error::RecvError::Closed) => Feed::Closed,
    }
}
