//! Repository for the `reports` table.

use assetrack_core::types::DbId;
use sqlx::PgPool;

use super::search_pattern;
use crate::models::report::{CreateReport, Report, ReportListParams, UpdateReport};
use crate::pagination::{clamp_limit, clamp_offset};

const COLUMNS: &str = "id, name, report_type, parameters, last_generated_at, \
                        created_at, updated_at";

/// Provides CRUD operations for saved reports.
pub struct ReportRepo;

impl ReportRepo {
    pub async fn create(pool: &PgPool, input: &CreateReport) -> Result<Report, sqlx::Error> {
        let query = format!(
            "INSERT INTO reports (name, report_type, parameters)
             VALUES ($1, $2, COALESCE($3, '{{}}'::jsonb))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Report>(&query)
            .bind(&input.name)
            .bind(&input.report_type)
            .bind(&input.parameters)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Report>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM reports WHERE id = $1");
        sqlx::query_as::<_, Report>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(
        pool: &PgPool,
        params: &ReportListParams,
    ) -> Result<Vec<Report>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM reports
             WHERE ($1::TEXT IS NULL OR name ILIKE $1)
               AND ($2::TEXT IS NULL OR report_type = $2)
             ORDER BY name, id
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, Report>(&query)
            .bind(search_pattern(params.search.as_deref()))
            .bind(&params.report_type)
            .bind(clamp_limit(params.limit))
            .bind(clamp_offset(params.offset))
            .fetch_all(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateReport,
    ) -> Result<Option<Report>, sqlx::Error> {
        let query = format!(
            "UPDATE reports SET
                name = COALESCE($2, name),
                report_type = COALESCE($3, report_type),
                parameters = COALESCE($4, parameters)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Report>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.report_type)
            .bind(&input.parameters)
            .fetch_optional(pool)
            .await
    }

    /// Stamp `last_generated_at = NOW()`.
    pub async fn mark_generated(pool: &PgPool, id: DbId) -> Result<Option<Report>, sqlx::Error> {
        let query = format!(
            "UPDATE reports SET last_generated_at = NOW() WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Report>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM reports WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
