//! Repository for the `consumables` table.

use assetrack_core::types::DbId;
use sqlx::PgPool;

use super::search_pattern;
use crate::models::consumable::{
    Consumable, ConsumableListParams, CreateConsumable, UpdateConsumable,
};
use crate::pagination::{clamp_limit, clamp_offset};

const COLUMNS: &str = "id, name, category, manufacturer, quantity, min_quantity, unit_cost, \
                        location, created_at, updated_at";

/// Provides CRUD operations for consumables.
pub struct ConsumableRepo;

impl ConsumableRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateConsumable,
    ) -> Result<Consumable, sqlx::Error> {
        let query = format!(
            "INSERT INTO consumables (name, category, manufacturer, quantity, min_quantity, \
                                      unit_cost, location)
             VALUES ($1, $2, $3, $4, COALESCE($5, 0), $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Consumable>(&query)
            .bind(&input.name)
            .bind(&input.category)
            .bind(&input.manufacturer)
            .bind(input.quantity)
            .bind(input.min_quantity)
            .bind(input.unit_cost)
            .bind(&input.location)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Consumable>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM consumables WHERE id = $1");
        sqlx::query_as::<_, Consumable>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List consumables; `low_stock` keeps rows at or below their threshold.
    pub async fn list(
        pool: &PgPool,
        params: &ConsumableListParams,
    ) -> Result<Vec<Consumable>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM consumables
             WHERE ($1::TEXT IS NULL OR name ILIKE $1 OR category ILIKE $1 OR manufacturer ILIKE $1)
               AND ($2::TEXT IS NULL OR category = $2)
               AND (NOT $3 OR quantity <= min_quantity)
             ORDER BY created_at DESC, id DESC
             LIMIT $4 OFFSET $5"
        );
        sqlx::query_as::<_, Consumable>(&query)
            .bind(search_pattern(params.search.as_deref()))
            .bind(&params.category)
            .bind(params.low_stock)
            .bind(clamp_limit(params.limit))
            .bind(clamp_offset(params.offset))
            .fetch_all(pool)
            .await
    }

    pub async fn list_all(pool: &PgPool) -> Result<Vec<Consumable>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM consumables ORDER BY id");
        sqlx::query_as::<_, Consumable>(&query).fetch_all(pool).await
    }

    /// Consumables at or below their reorder threshold.
    pub async fn list_low_stock(pool: &PgPool) -> Result<Vec<Consumable>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM consumables WHERE quantity <= min_quantity ORDER BY name"
        );
        sqlx::query_as::<_, Consumable>(&query).fetch_all(pool).await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateConsumable,
    ) -> Result<Option<Consumable>, sqlx::Error> {
        let query = format!(
            "UPDATE consumables SET
                name = COALESCE($2, name),
                category = COALESCE($3, category),
                manufacturer = COALESCE($4, manufacturer),
                quantity = COALESCE($5, quantity),
                min_quantity = COALESCE($6, min_quantity),
                unit_cost = COALESCE($7, unit_cost),
                location = COALESCE($8, location)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Consumable>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.category)
            .bind(&input.manufacturer)
            .bind(input.quantity)
            .bind(input.min_quantity)
            .bind(input.unit_cost)
            .bind(&input.location)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM consumables WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
