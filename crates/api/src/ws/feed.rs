use std::sync::Arc;

use assetrack_core::change::ChangeEvent;
use tokio::sync::broadcast;

use super::manager::WsManager;

/// Forwards bus events to realtime WebSocket clients.
pub struct ChangeFeed {
    ws_manager: Arc<WsManager>,
}

impl ChangeFeed {
    pub fn new(ws_manager: Arc<WsManager>) -> Self {
        Self { ws_manager }
    }

    /// Drain `receiver` until the bus is dropped.
    pub async fn run(self, mut receiver: broadcast::Receiver<ChangeEvent>) {
        loop {
            match receiver.recv().await {
                Ok(event) => {
                    let sent = self.ws_manager.dispatch(&event).await;
                    tracing::trace!(
                        table = %event.table,
                        action = event.action.as_str(),
                        record_id = event.record_id,
                        sent,
                        "Change event fanned out"
                    );
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(skipped = n, "Realtime feed lagged");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("Event bus closed, realtime feed shutting down");
                    break;
                }
            }
        }
    }
}
