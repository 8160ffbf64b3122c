use std::collections::HashMap;

use assetrack_core::change::ChangeEvent;
use assetrack_core::types::{DbId, Timestamp};
use axum::body::Bytes;
use axum::extract::ws::Message;
use tokio::sync::{mpsc, RwLock};

/// Outbound half of a connection's message channel.
pub type WsSender = mpsc::UnboundedSender<Message>;

/// One open realtime connection.
pub struct WsConnection {
    pub user_id: DbId,
    /// Only events for this table are forwarded; `None` receives all.
    pub table: Option<String>,
    pub sender: WsSender,
    pub connected_at: Timestamp,
}

/// Registry of open realtime connections, shared behind an `Arc`.
pub struct WsManager {
    connections: RwLock<HashMap<String, WsConnection>>,
}

impl WsManager {
    pub fn new() -> Self {
        Self {
            connections: RwLock::new(HashMap::new()),
        }
    }

    /// Register a connection and return the receiver its socket task drains.
    pub async fn add(
        &self,
        conn_id: String,
        user_id: DbId,
        table: Option<String>,
    ) -> mpsc::UnboundedReceiver<Message> {
        let (tx, rx) = mpsc::unbounded_channel();
        let conn = WsConnection {
            user_id,
            table,
            sender: tx,
            connected_at: chrono::Utc::now(),
        };
        self.connections.write().await.insert(conn_id, conn);
        rx
    }

    /// Forget a connection, handing back its registration if it was known.
    pub async fn remove(&self, conn_id: &str) -> Option<WsConnection> {
        self.connections.write().await.remove(conn_id)
    }

    /// Send `event` as a JSON text frame to every connection watching its table.
    ///
    /// Returns how many connections it was queued for. Closed channels are
    /// skipped; their socket task removes them.
    pub async fn dispatch(&self, event: &ChangeEvent) -> usize {
        let payload = match serde_json::to_string(event) {
            Ok(json) => json,
            Err(e) => {
                tracing::error!(error = %e, table = %event.table, "Failed to encode change event");
                return 0;
            }
        };

        let conns = self.connections.read().await;
        let mut sent = 0;
        for conn in conns.values() {
            if event.matches_table(conn.table.as_deref())
                && conn.sender.send(Message::Text(payload.clone().into())).is_ok()
            {
                sent += 1;
            }
        }
        sent
    }

    pub async fn connection_count(&self) -> usize {
        self.connections.read().await.len()
    }

    /// Connections currently filtered to `table` (plus unfiltered ones).
    pub async fn watchers_of(&self, table: &str) -> usize {
        self.connections
            .read()
            .await
            .values()
            .filter(|c| c.table.as_deref().is_none_or(|t| t == table))
            .count()
    }

    /// Send Close to everyone and forget all connections.
    pub async fn shutdown_all(&self) {
        let mut conns = self.connections.write().await;
        let count = conns.len();
        for conn in conns.values() {
            let _ = conn.sender.send(Message::Close(None));
        }
        conns.clear();
        tracing::info!(count, "Closed all realtime connections");
    }

    pub async fn ping_all(&self) {
        let conns = self.connections.read().await;
        for conn in conns.values() {
            let _ = conn.sender.send(Message::Ping(Bytes::new()));
        }
    }
}

impl Default for WsManager {
    fn default() -> Self {
        Self::new()
    }
}
