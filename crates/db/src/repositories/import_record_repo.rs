//! Repository for the `import_records` table.

use assetrack_core::types::DbId;
use sqlx::PgPool;

use super::search_pattern;
use crate::models::import_record::{
    CreateImportRecord, ImportListParams, ImportRecord, UpdateImportRecord,
};
use crate::pagination::{clamp_limit, clamp_offset};

const COLUMNS: &str = "id, integration_id, file_name, entity_type, status, total_rows, \
                        imported_rows, failed_rows, error_summary, created_at, updated_at";

/// Provides CRUD operations for import runs.
pub struct ImportRecordRepo;

impl ImportRecordRepo {
    /// Insert a new import run in `pending` state.
    pub async fn create(
        pool: &PgPool,
        input: &CreateImportRecord,
    ) -> Result<ImportRecord, sqlx::Error> {
        let query = format!(
            "INSERT INTO import_records (integration_id, file_name, entity_type, total_rows)
             VALUES ($1, $2, $3, COALESCE($4, 0))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ImportRecord>(&query)
            .bind(input.integration_id)
            .bind(&input.file_name)
            .bind(&input.entity_type)
            .bind(input.total_rows)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<ImportRecord>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM import_records WHERE id = $1");
        sqlx::query_as::<_, ImportRecord>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(
        pool: &PgPool,
        params: &ImportListParams,
    ) -> Result<Vec<ImportRecord>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM import_records
             WHERE ($1::TEXT IS NULL OR file_name ILIKE $1 OR entity_type ILIKE $1)
               AND ($2::BIGINT IS NULL OR integration_id = $2)
               AND ($3::TEXT IS NULL OR status = $3)
             ORDER BY created_at DESC, id DESC
             LIMIT $4 OFFSET $5"
        );
        sqlx::query_as::<_, ImportRecord>(&query)
            .bind(search_pattern(params.search.as_deref()))
            .bind(params.integration_id)
            .bind(&params.status)
            .bind(clamp_limit(params.limit))
            .bind(clamp_offset(params.offset))
            .fetch_all(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateImportRecord,
    ) -> Result<Option<ImportRecord>, sqlx::Error> {
        let query = format!(
            "UPDATE import_records SET
                status = COALESCE($2, status),
                total_rows = COALESCE($3, total_rows),
                imported_rows = COALESCE($4, imported_rows),
                failed_rows = COALESCE($5, failed_rows),
                error_summary = COALESCE($6, error_summary)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ImportRecord>(&query)
            .bind(id)
            .bind(&input.status)
            .bind(input.total_rows)
            .bind(input.imported_rows)
            .bind(input.failed_rows)
            .bind(&input.error_summary)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM import_records WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
