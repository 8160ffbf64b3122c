//! Repository for the `integrations` table.

use assetrack_core::types::DbId;
use sqlx::PgPool;

use super::search_pattern;
use crate::models::integration::{
    CreateIntegration, Integration, IntegrationListParams, UpdateIntegration,
};
use crate::pagination::{clamp_limit, clamp_offset};

const COLUMNS: &str = "id, name, provider, status, base_url, field_mappings, last_sync_at, \
                        created_at, updated_at";

/// Provides CRUD operations for integrations.
pub struct IntegrationRepo;

impl IntegrationRepo {
    /// Insert a new integration. Defaults: `inactive`, empty mapping.
    pub async fn create(
        pool: &PgPool,
        input: &CreateIntegration,
    ) -> Result<Integration, sqlx::Error> {
        let query = format!(
            "INSERT INTO integrations (name, provider, status, base_url, field_mappings)
             VALUES ($1, $2, COALESCE($3, 'inactive'), $4, COALESCE($5, '{{}}'::jsonb))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Integration>(&query)
            .bind(&input.name)
            .bind(&input.provider)
            .bind(&input.status)
            .bind(&input.base_url)
            .bind(&input.field_mappings)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Integration>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM integrations WHERE id = $1");
        sqlx::query_as::<_, Integration>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(
        pool: &PgPool,
        params: &IntegrationListParams,
    ) -> Result<Vec<Integration>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM integrations
             WHERE ($1::TEXT IS NULL OR name ILIKE $1 OR provider ILIKE $1)
               AND ($2::TEXT IS NULL OR status = $2)
             ORDER BY name, id
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, Integration>(&query)
            .bind(search_pattern(params.search.as_deref()))
            .bind(&params.status)
            .bind(clamp_limit(params.limit))
            .bind(clamp_offset(params.offset))
            .fetch_all(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateIntegration,
    ) -> Result<Option<Integration>, sqlx::Error> {
        let query = format!(
            "UPDATE integrations SET
                name = COALESCE($2, name),
                provider = COALESCE($3, provider),
                status = COALESCE($4, status),
                base_url = COALESCE($5, base_url),
                field_mappings = COALESCE($6, field_mappings)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Integration>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.provider)
            .bind(&input.status)
            .bind(&input.base_url)
            .bind(&input.field_mappings)
            .fetch_optional(pool)
            .await
    }

    /// Stamp `last_sync_at = NOW()`.
    pub async fn touch_last_sync(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<Integration>, sqlx::Error> {
        let query = format!(
            "UPDATE integrations SET last_sync_at = NOW() WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Integration>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM integrations WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
