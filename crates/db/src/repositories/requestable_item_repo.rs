//! Repository for the `requestable_items` table.

use assetrack_core::types::DbId;
use sqlx::PgPool;

use super::search_pattern;
use crate::models::requestable_item::{
    CreateRequestableItem, RequestableItem, RequestableItemListParams, UpdateRequestableItem,
};
use crate::pagination::{clamp_limit, clamp_offset};

const COLUMNS: &str = "id, name, item_type, item_id, category, quantity_available, \
                        is_requestable, created_at, updated_at";

/// Provides CRUD operations for requestable items.
pub struct RequestableItemRepo;

impl RequestableItemRepo {
    pub async fn create(
        pool: &PgPool,
        input: &CreateRequestableItem,
    ) -> Result<RequestableItem, sqlx::Error> {
        let query = format!(
            "INSERT INTO requestable_items (name, item_type, item_id, category, \
                                            quantity_available, is_requestable)
             VALUES ($1, $2, $3, $4, COALESCE($5, 0), COALESCE($6, TRUE))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, RequestableItem>(&query)
            .bind(&input.name)
            .bind(&input.item_type)
            .bind(input.item_id)
            .bind(&input.category)
            .bind(input.quantity_available)
            .bind(input.is_requestable)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<RequestableItem>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM requestable_items WHERE id = $1");
        sqlx::query_as::<_, RequestableItem>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(
        pool: &PgPool,
        params: &RequestableItemListParams,
    ) -> Result<Vec<RequestableItem>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM requestable_items
             WHERE ($1::TEXT IS NULL OR name ILIKE $1 OR category ILIKE $1 OR item_type ILIKE $1)
               AND ($2::TEXT IS NULL OR item_type = $2)
               AND (NOT $3 OR is_requestable)
             ORDER BY name, id
             LIMIT $4 OFFSET $5"
        );
        sqlx::query_as::<_, RequestableItem>(&query)
            .bind(search_pattern(params.search.as_deref()))
            .bind(&params.item_type)
            .bind(params.requestable_only)
            .bind(clamp_limit(params.limit))
            .bind(clamp_offset(params.offset))
            .fetch_all(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateRequestableItem,
    ) -> Result<Option<RequestableItem>, sqlx::Error> {
        let query = format!(
            "UPDATE requestable_items SET
                name = COALESCE($2, name),
                item_type = COALESCE($3, item_type),
                item_id = COALESCE($4, item_id),
                category = COALESCE($5, category),
                quantity_available = COALESCE($6, quantity_available),
                is_requestable = COALESCE($7, is_requestable)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, RequestableItem>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.item_type)
            .bind(input.item_id)
            .bind(&input.category)
            .bind(input.quantity_available)
            .bind(input.is_requestable)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM requestable_items WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
