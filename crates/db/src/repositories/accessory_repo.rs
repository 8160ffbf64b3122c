//! Repository for the `accessories` table.

use assetrack_core::types::DbId;
use sqlx::PgPool;

use super::search_pattern;
use crate::models::accessory::{Accessory, AccessoryListParams, CreateAccessory, UpdateAccessory};
use crate::pagination::{clamp_limit, clamp_offset};

const COLUMNS: &str = "id, name, category, manufacturer, model, quantity, available_quantity, \
                        purchase_cost, location, created_at, updated_at";

/// Provides CRUD operations for accessories.
pub struct AccessoryRepo;

impl AccessoryRepo {
    /// Insert a new accessory. `available_quantity` defaults to `quantity`.
    pub async fn create(pool: &PgPool, input: &CreateAccessory) -> Result<Accessory, sqlx::Error> {
        let query = format!(
            "INSERT INTO accessories (name, category, manufacturer, model, quantity, \
                                      available_quantity, purchase_cost, location)
             VALUES ($1, $2, $3, $4, $5, COALESCE($6, $5), $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Accessory>(&query)
            .bind(&input.name)
            .bind(&input.category)
            .bind(&input.manufacturer)
            .bind(&input.model)
            .bind(input.quantity)
            .bind(input.available_quantity)
            .bind(input.purchase_cost)
            .bind(&input.location)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Accessory>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM accessories WHERE id = $1");
        sqlx::query_as::<_, Accessory>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(
        pool: &PgPool,
        params: &AccessoryListParams,
    ) -> Result<Vec<Accessory>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM accessories
             WHERE ($1::TEXT IS NULL OR name ILIKE $1 OR category ILIKE $1
                    OR manufacturer ILIKE $1 OR model ILIKE $1)
               AND ($2::TEXT IS NULL OR category = $2)
             ORDER BY created_at DESC, id DESC
             LIMIT $3 OFFSET $4"
        );
        sqlx::query_as::<_, Accessory>(&query)
            .bind(search_pattern(params.search.as_deref()))
            .bind(&params.category)
            .bind(clamp_limit(params.limit))
            .bind(clamp_offset(params.offset))
            .fetch_all(pool)
            .await
    }

    pub async fn list_all(pool: &PgPool) -> Result<Vec<Accessory>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM accessories ORDER BY id");
        sqlx::query_as::<_, Accessory>(&query).fetch_all(pool).await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateAccessory,
    ) -> Result<Option<Accessory>, sqlx::Error> {
        let query = format!(
            "UPDATE accessories SET
                name = COALESCE($2, name),
                category = COALESCE($3, category),
                manufacturer = COALESCE($4, manufacturer),
                model = COALESCE($5, model),
                quantity = COALESCE($6, quantity),
                available_quantity = COALESCE($7, available_quantity),
                purchase_cost = COALESCE($8, purchase_cost),
                location = COALESCE($9, location)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Accessory>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.category)
            .bind(&input.manufacturer)
            .bind(&input.model)
            .bind(input.quantity)
            .bind(input.available_quantity)
            .bind(input.purchase_cost)
            .bind(&input.location)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM accessories WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
