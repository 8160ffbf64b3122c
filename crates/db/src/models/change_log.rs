//! Persisted row-change history.

use assetrack_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `change_log` table.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct ChangeLogEntry {
    pub id: DbId,
    pub table_name: String,
    pub action: String,
    pub record_id: DbId,
    pub actor_user_id: Option<DbId>,
    pub payload: serde_json::Value,
    pub created_at: Timestamp,
}

/// Query parameters for reading the change history of a table or row.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChangeLogParams {
    pub table_name: Option<String>,
    pub record_id: Option<DbId>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
