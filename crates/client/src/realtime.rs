//! Subscription to the server's `/realtime` change feed.

use assetrack_core::change::ChangeEvent;
use futures::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::sync::broadcast;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use tokio_util::sync::CancellationToken;

use crate::config::ClientConfig;
use crate::error::ClientError;

/// Capacity of the channel returned by [`RealtimeSubscription::into_broadcast`].
const FORWARD_CAPACITY: usize = 256;

/// A live WebSocket receiving [`ChangeEvent`]s.
pub struct RealtimeSubscription {
    table: Option<String>,
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl RealtimeSubscription {
    /// Connect with `access_token`, optionally filtered to one table.
    pub async fn connect(
        config: &ClientConfig,
        access_token: &str,
        table: Option<&str>,
    ) -> Result<Self, ClientError> {
        let url = subscription_url(config, access_token, table);
        let (stream, _response) = connect_async(url)
            .await
            .map_err(|e| ClientError::WebSocket(format!("Failed to connect: {e}")))?;
        tracing::info!(table = ?table, "Realtime subscription connected");
        Ok(Self {
            table: table.map(str::to_string),
            stream,
        })
    }

    pub fn table(&self) -> Option<&str> {
        self.table.as_deref()
    }

    /// Next change event, or `None` once the server closes the socket.
    ///
    /// Control frames are handled transparently; undecodable text frames
    /// are logged and skipped.
    pub async fn next_event(&mut self) -> Option<Result<ChangeEvent, ClientError>> {
        while let Some(frame) = self.stream.next().await {
            match frame {
                Ok(Message::Text(text)) => match decode_event(&text) {
                    Ok(event) => return Some(Ok(event)),
                    Err(e) => tracing::warn!(error = %e, "Skipping malformed change event"),
                },
                Ok(Message::Close(_)) => return None,
                Ok(_) => {}
                Err(e) => return Some(Err(ClientError::WebSocket(e.to_string()))),
            }
        }
        None
    }

    pub async fn close(mut self) -> Result<(), ClientError> {
        self.stream
            .close(None)
            .await
            .map_err(|e| ClientError::WebSocket(e.to_string()))
    }

    /// Pump events into a broadcast channel so several caches can share
    /// one socket. The task ends when the socket closes or `cancel` fires.
    pub fn into_broadcast(
        mut self,
        cancel: CancellationToken,
    ) -> (broadcast::Sender<ChangeEvent>, tokio::task::JoinHandle<()>) {
        let (tx, _) = broadcast::channel(FORWARD_CAPACITY);
        let sender = tx.clone();
        let handle = tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = cancel.cancelled() => break,
                    next = self.next_event() => match next {
                        Some(Ok(event)) => {
                            // No receivers is fine; caches may subscribe later.
                            let _ = sender.send(event);
                        }
                        Some(Err(e)) => {
                            tracing::error!(error = %e, "Realtime subscription failed");
                            break;
                        }
                        None => {
                            tracing::info!("Realtime subscription closed by server");
                            return;
                        }
                    }
                }
            }
            let _ = self.stream.send(Message::Close(None)).await;
        });
        (tx, handle)
    }
}

fn subscription_url(config: &ClientConfig, access_token: &str, table: Option<&str>) -> String {
    let mut url = format!("{}?token={access_token}", config.ws_url("/realtime"));
    if let Some(table) = table {
        url.push_str("&table=");
        url.push_str(table);
    }
    url
}

fn decode_event(text: &str) -> Result<ChangeEvent, ClientError> {
    serde_json::from_str(text).map_err(|e| ClientError::Decode(e.to_string()))
}
