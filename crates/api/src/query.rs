//! Query parameter types shared across handler modules.
//!
//! Per-table list filters live with their models in `assetrack_db`.

use serde::Deserialize;

/// `?field=` for `GET /dashboard/breakdown`.
#[derive(Debug, Deserialize)]
pub struct BreakdownParams {
    /// One of `category`, `status`, `manufacturer`, `location`.
    pub field: String,
}

/// `?table=` for the realtime feed; absent means every table.
#[derive(Debug, Default, Deserialize)]
pub struct RealtimeParams {
    pub table: Option<String>,
    /// Access token, for WebSocket clients that cannot set headers.
    pub token: Option<String>,
}
