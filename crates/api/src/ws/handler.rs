use std::sync::Arc;

use assetrack_core::change::WATCHED_TABLES;
use assetrack_core::error::CoreError;
use assetrack_core::types::DbId;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Query, State};
use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use axum::response::IntoResponse;
use futures::{SinkExt, StreamExt};

use crate::auth::jwt::validate_token;
use crate::error::{AppError, AppResult};
use crate::query::RealtimeParams;
use crate::state::AppState;
use crate::ws::manager::WsManager;

/// GET /api/v1/realtime?table=<name>
///
/// Authenticates with the bearer header or `?token=`, rejects unknown
/// tables, then upgrades to a WebSocket that receives change events.
pub async fn realtime_handler(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
    Query(params): Query<RealtimeParams>,
    headers: HeaderMap,
) -> AppResult<impl IntoResponse> {
    let token = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .or(params.token.as_deref())
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized("Missing access token".into()))
        })?;
    let claims = validate_token(token, &state.config.jwt).map_err(|_| {
        AppError::Core(CoreError::Unauthorized("Invalid or expired token".into()))
    })?;

    if let Some(table) = params.table.as_deref() {
        if !WATCHED_TABLES.contains(&table) {
            return Err(AppError::BadRequest(format!(
                "Unknown table '{table}'. Valid tables: {}",
                WATCHED_TABLES.join(", ")
            )));
        }
    }

    let manager = Arc::clone(&state.ws_manager);
    let table = params.table;
    Ok(ws.on_upgrade(move |socket| handle_socket(socket, manager, claims.sub, table)))
}

/// Pump one connection: outbound frames come from the manager channel,
/// inbound frames are only watched for close.
async fn handle_socket(
    socket: WebSocket,
    ws_manager: Arc<WsManager>,
    user_id: DbId,
    table: Option<String>,
) {
    let conn_id = uuid::Uuid::new_v4().to_string();
    tracing::info!(conn_id = %conn_id, user_id, table = ?table, "Realtime client connected");

    let mut rx = ws_manager.add(conn_id.clone(), user_id, table).await;
    let (mut sink, mut stream) = socket.split();

    let sender_conn_id = conn_id.clone();
    let send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            let closing = matches!(msg, Message::Close(_));
            if sink.send(msg).await.is_err() || closing {
                tracing::debug!(conn_id = %sender_conn_id, "Realtime sink closed");
                break;
            }
        }
    });

    while let Some(result) = stream.next().await {
        match result {
            Ok(Message::Close(_)) => break,
            Ok(Message::Pong(_)) => tracing::trace!(conn_id = %conn_id, "Pong received"),
            Ok(_) => {}
            Err(e) => {
                tracing::debug!(conn_id = %conn_id, error = %e, "Realtime receive error");
                break;
            }
        }
    }

    send_task.abort();
    if let Some(conn) = ws_manager.remove(&conn_id).await {
        let connected_secs = (chrono::Utc::now() - conn.connected_at).num_seconds();
        tracing::info!(
            conn_id = %conn_id,
            user_id = conn.user_id,
            connected_secs,
            "Realtime client disconnected"
        );
    }
}
