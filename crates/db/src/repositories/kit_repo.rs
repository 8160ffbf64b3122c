//! Repository for the `predefined_kits` table.

use assetrack_core::types::DbId;
use sqlx::types::Json;
use sqlx::PgPool;

use super::search_pattern;
use crate::models::kit::{CreateKit, KitListParams, PredefinedKit, UpdateKit};
use crate::pagination::{clamp_limit, clamp_offset};

const COLUMNS: &str = "id, name, description, items, created_at, updated_at";

/// Provides CRUD operations for predefined kits.
pub struct KitRepo;

impl KitRepo {
    pub async fn create(pool: &PgPool, input: &CreateKit) -> Result<PredefinedKit, sqlx::Error> {
        let query = format!(
            "INSERT INTO predefined_kits (name, description, items)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PredefinedKit>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(Json(&input.items))
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<PredefinedKit>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM predefined_kits WHERE id = $1");
        sqlx::query_as::<_, PredefinedKit>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(
        pool: &PgPool,
        params: &KitListParams,
    ) -> Result<Vec<PredefinedKit>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM predefined_kits
             WHERE ($1::TEXT IS NULL OR name ILIKE $1 OR description ILIKE $1)
             ORDER BY name, id
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, PredefinedKit>(&query)
            .bind(search_pattern(params.search.as_deref()))
            .bind(clamp_limit(params.limit))
            .bind(clamp_offset(params.offset))
            .fetch_all(pool)
            .await
    }

    /// Update a kit. A present `items` list replaces the stored one wholesale.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateKit,
    ) -> Result<Option<PredefinedKit>, sqlx::Error> {
        let query = format!(
            "UPDATE predefined_kits SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                items = COALESCE($4, items)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, PredefinedKit>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.items.as_ref().map(Json))
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM predefined_kits WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
