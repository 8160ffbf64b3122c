//! Repository for the `alerts` table.

use assetrack_core::types::DbId;
use sqlx::PgPool;

use super::search_pattern;
use crate::models::alert::{Alert, AlertListParams, CreateAlert, UpdateAlert};
use crate::pagination::{clamp_limit, clamp_offset};

const COLUMNS: &str = "id, alert_type, severity, title, message, entity_type, entity_id, \
                        is_resolved, resolved_at, created_at, updated_at";

/// Provides CRUD and resolution for alerts.
pub struct AlertRepo;

impl AlertRepo {
    /// Insert a new alert. `severity` defaults to `medium`.
    pub async fn create(pool: &PgPool, input: &CreateAlert) -> Result<Alert, sqlx::Error> {
        let query = format!(
            "INSERT INTO alerts (alert_type, severity, title, message, entity_type, entity_id)
             VALUES ($1, COALESCE($2, 'medium'), $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Alert>(&query)
            .bind(&input.alert_type)
            .bind(&input.severity)
            .bind(&input.title)
            .bind(&input.message)
            .bind(&input.entity_type)
            .bind(input.entity_id)
            .fetch_one(pool)
            .await
    }

    /// Insert an alert unless an unresolved one of the same type already
    /// exists for the entity. Returns `None` when the insert was skipped.
    pub async fn create_if_absent(
        pool: &PgPool,
        input: &CreateAlert,
    ) -> Result<Option<Alert>, sqlx::Error> {
        let query = format!(
            "INSERT INTO alerts (alert_type, severity, title, message, entity_type, entity_id)
             VALUES ($1, COALESCE($2, 'medium'), $3, $4, $5, $6)
             ON CONFLICT (alert_type, entity_type, entity_id) WHERE is_resolved = FALSE
             DO NOTHING
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Alert>(&query)
            .bind(&input.alert_type)
            .bind(&input.severity)
            .bind(&input.title)
            .bind(&input.message)
            .bind(&input.entity_type)
            .bind(input.entity_id)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Alert>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM alerts WHERE id = $1");
        sqlx::query_as::<_, Alert>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List alerts, newest first. Resolved alerts are hidden unless
    /// `include_resolved` is set.
    pub async fn list(pool: &PgPool, params: &AlertListParams) -> Result<Vec<Alert>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM alerts
             WHERE ($1::TEXT IS NULL OR title ILIKE $1 OR message ILIKE $1 OR alert_type ILIKE $1)
               AND ($2::TEXT IS NULL OR severity = $2)
               AND ($3::TEXT IS NULL OR alert_type = $3)
               AND ($4 OR NOT is_resolved)
             ORDER BY created_at DESC, id DESC
             LIMIT $5 OFFSET $6"
        );
        sqlx::query_as::<_, Alert>(&query)
            .bind(search_pattern(params.search.as_deref()))
            .bind(&params.severity)
            .bind(&params.alert_type)
            .bind(params.include_resolved)
            .bind(clamp_limit(params.limit))
            .bind(clamp_offset(params.offset))
            .fetch_all(pool)
            .await
    }

    /// Number of unresolved alerts.
    pub async fn count_open(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM alerts WHERE NOT is_resolved")
            .fetch_one(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateAlert,
    ) -> Result<Option<Alert>, sqlx::Error> {
        let query = format!(
            "UPDATE alerts SET
                severity = COALESCE($2, severity),
                title = COALESCE($3, title),
                message = COALESCE($4, message)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Alert>(&query)
            .bind(id)
            .bind(&input.severity)
            .bind(&input.title)
            .bind(&input.message)
            .fetch_optional(pool)
            .await
    }

    /// Mark an alert resolved. Resolving an already-resolved alert keeps
    /// its original `resolved_at`.
    pub async fn resolve(pool: &PgPool, id: DbId) -> Result<Option<Alert>, sqlx::Error> {
        let query = format!(
            "UPDATE alerts SET
                is_resolved = TRUE,
                resolved_at = COALESCE(resolved_at, NOW())
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Alert>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM alerts WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
