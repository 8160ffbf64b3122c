//! Repository for the `components` table.

use assetrack_core::types::DbId;
use sqlx::PgPool;

use super::search_pattern;
use crate::models::component::{Component, ComponentListParams, CreateComponent, UpdateComponent};
use crate::pagination::{clamp_limit, clamp_offset};

const COLUMNS: &str = "id, name, category, manufacturer, serial, quantity, available_quantity, \
                        purchase_cost, asset_id, created_at, updated_at";

/// Provides CRUD operations for components.
pub struct ComponentRepo;

impl ComponentRepo {
    /// Insert a new component. `available_quantity` defaults to `quantity`.
    pub async fn create(pool: &PgPool, input: &CreateComponent) -> Result<Component, sqlx::Error> {
        let query = format!(
            "INSERT INTO components (name, category, manufacturer, serial, quantity, \
                                     available_quantity, purchase_cost, asset_id)
             VALUES ($1, $2, $3, $4, $5, COALESCE($6, $5), $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Component>(&query)
            .bind(&input.name)
            .bind(&input.category)
            .bind(&input.manufacturer)
            .bind(&input.serial)
            .bind(input.quantity)
            .bind(input.available_quantity)
            .bind(input.purchase_cost)
            .bind(input.asset_id)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Component>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM components WHERE id = $1");
        sqlx::query_as::<_, Component>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(
        pool: &PgPool,
        params: &ComponentListParams,
    ) -> Result<Vec<Component>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM components
             WHERE ($1::TEXT IS NULL OR name ILIKE $1 OR category ILIKE $1
                    OR manufacturer ILIKE $1 OR serial ILIKE $1)
               AND ($2::TEXT IS NULL OR category = $2)
               AND ($3::BIGINT IS NULL OR asset_id = $3)
             ORDER BY created_at DESC, id DESC
             LIMIT $4 OFFSET $5"
        );
        sqlx::query_as::<_, Component>(&query)
            .bind(search_pattern(params.search.as_deref()))
            .bind(&params.category)
            .bind(params.asset_id)
            .bind(clamp_limit(params.limit))
            .bind(clamp_offset(params.offset))
            .fetch_all(pool)
            .await
    }

    pub async fn list_all(pool: &PgPool) -> Result<Vec<Component>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM components ORDER BY id");
        sqlx::query_as::<_, Component>(&query).fetch_all(pool).await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateComponent,
    ) -> Result<Option<Component>, sqlx::Error> {
        let query = format!(
            "UPDATE components SET
                name = COALESCE($2, name),
                category = COALESCE($3, category),
                manufacturer = COALESCE($4, manufacturer),
                serial = COALESCE($5, serial),
                quantity = COALESCE($6, quantity),
                available_quantity = COALESCE($7, available_quantity),
                purchase_cost = COALESCE($8, purchase_cost),
                asset_id = COALESCE($9, asset_id)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Component>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.category)
            .bind(&input.manufacturer)
            .bind(&input.serial)
            .bind(input.quantity)
            .bind(input.available_quantity)
            .bind(input.purchase_cost)
            .bind(input.asset_id)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM components WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
