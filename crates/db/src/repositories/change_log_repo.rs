//! Repository for the append-only `change_log` table.

use assetrack_core::types::DbId;
use sqlx::PgPool;

use crate::models::change_log::{ChangeLogEntry, ChangeLogParams};
use crate::pagination::{clamp_limit, clamp_offset};

const COLUMNS: &str = "id, table_name, action, record_id, actor_user_id, payload, created_at";

/// Provides insert and query access to the change history.
pub struct ChangeLogRepo;

impl ChangeLogRepo {
    /// Append one change.
    pub async fn insert(
        pool: &PgPool,
        table_name: &str,
        action: &str,
        record_id: DbId,
        actor_user_id: Option<DbId>,
        payload: &serde_json::Value,
    ) -> Result<ChangeLogEntry, sqlx::Error> {
        let query = format!(
            "INSERT INTO change_log (table_name, action, record_id, actor_user_id, payload)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ChangeLogEntry>(&query)
            .bind(table_name)
            .bind(action)
            .bind(record_id)
            .bind(actor_user_id)
            .bind(payload)
            .fetch_one(pool)
            .await
    }

    /// Most recent changes first, optionally narrowed to a table and row.
    pub async fn list(
        pool: &PgPool,
        params: &ChangeLogParams,
    ) -> Result<Vec<ChangeLogEntry>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM change_log
             WHERE ($1::TEXT IS NULL OR table_name = $1)
               AND ($2::BIGINT IS NULL OR record_id = $2)
             ORDER BY created_at DESC, id DESC
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, ChangeLogEntry>(&query)
            .bind(&params.table_name)
            .bind(params.record_id)
            .bind(clamp_limit(params.limit))
            .bind(clamp_offset(params.offset))
            .fetch_all(pool)
            .await
    }
}
