use std::sync::Arc;

use assetrack_core::change::{ChangeAction, ChangeEvent};
use assetrack_core::types::DbId;
use assetrack_events::EventBus;
use serde::Serialize;

use crate::config::ServerConfig;
use crate::ws::WsManager;

/// Shared state handed to every handler via `State<AppState>`.
#[derive(Clone)]
pub struct AppState {
    pub pool: assetrack_db::DbPool,
    pub config: Arc<ServerConfig>,
    /// Realtime WebSocket connections.
    pub ws_manager: Arc<WsManager>,
    /// Table change feed.
    pub event_bus: Arc<EventBus>,
}

impl AppState {
    /// Publish a change to `table` made by `actor`, attaching the row snapshot.
    ///
    /// A row that fails to serialize is published without its snapshot.
    pub fn publish_change<T: Serialize>(
        &self,
        table: &str,
        action: ChangeAction,
        record_id: DbId,
        actor: DbId,
        record: &T,
    ) {
        let mut event = ChangeEvent::new(table, action, record_id).with_actor(actor);
        match serde_json::to_value(record) {
            Ok(value) => event = event.with_record(value),
            Err(e) => {
                tracing::warn!(table, record_id, error = %e, "Change snapshot not serializable")
            }
        }
        self.event_bus.publish(event);
    }

    /// Publish a delete; the payload is empty.
    pub fn publish_delete(&self, table: &str, record_id: DbId, actor: DbId) {
        self.event_bus
            .publish(ChangeEvent::new(table, ChangeAction::Delete, record_id).with_actor(actor));
    }
}
