//! Durable change-log writer.
//!
//! [`ChangePersistence`] subscribes to the [`EventBus`](crate::bus::EventBus)
//! and appends every received [`ChangeEvent`] to `change_log`. It runs as a
//! long-lived background task and exits when the bus sender is dropped.

use assetrack_core::change::ChangeEvent;
use assetrack_db::models::change_log::ChangeLogEntry;
use assetrack_db::repositories::ChangeLogRepo;
use assetrack_db::DbPool;
use tokio::sync::broadcast;

/// Background service that persists change events to the database.
pub struct ChangePersistence;

impl ChangePersistence {
    /// Run the persistence loop until the channel closes.
    pub async fn run(pool: DbPool, mut receiver: broadcast::Receiver<ChangeEvent>) {
        loop {
            match receiver.recv().await {
                Ok(event) => {
                    if let Err(e) = Self::persist(&pool, &event).await {
                        tracing::error!(
                            error = %e,
                            table = %event.table,
                            record_id = event.record_id,
                            "Failed to persist change event"
                        );
                    }
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(
                        skipped = n,
                        "Change persistence lagged, some events were not recorded"
                    );
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("Event bus closed, change persistence shutting down");
                    break;
                }
            }
        }
    }

    /// Write a single event to `change_log`.
    pub async fn persist(
        pool: &DbPool,
        event: &ChangeEvent,
    ) -> Result<ChangeLogEntry, sqlx::Error> {
        ChangeLogRepo::insert(
            pool,
            &event.table,
            event.action.as_str(),
            event.record_id,
            event.actor_user_id,
            &event.record,
        )
        .await
    }
}
