//! Repository for the `assets` table.

use assetrack_core::types::{Date, DbId};
use sqlx::PgPool;

use super::search_pattern;
use crate::models::asset::{Asset, AssetListParams, CreateAsset, UpdateAsset};
use crate::pagination::{clamp_limit, clamp_offset};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, asset_tag, serial, model, category, manufacturer, status, \
                        location, assigned_to, purchase_date, purchase_cost, warranty_expiry, \
                        notes, created_at, updated_at";

/// Provides CRUD operations for assets.
pub struct AssetRepo;

impl AssetRepo {
    /// Insert a new asset, returning the created row.
    ///
    /// A missing `status` falls back to `ready_to_deploy`.
    pub async fn create(pool: &PgPool, input: &CreateAsset) -> Result<Asset, sqlx::Error> {
        let query = format!(
            "INSERT INTO assets (name, asset_tag, serial, model, category, manufacturer, status, \
                                 location, assigned_to, purchase_date, purchase_cost, \
                                 warranty_expiry, notes)
             VALUES ($1, $2, $3, $4, $5, $6, COALESCE($7, 'ready_to_deploy'),
                     $8, $9, $10, $11, $12, $13)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Asset>(&query)
            .bind(&input.name)
            .bind(&input.asset_tag)
            .bind(&input.serial)
            .bind(&input.model)
            .bind(&input.category)
            .bind(&input.manufacturer)
            .bind(&input.status)
            .bind(&input.location)
            .bind(input.assigned_to)
            .bind(input.purchase_date)
            .bind(input.purchase_cost)
            .bind(input.warranty_expiry)
            .bind(&input.notes)
            .fetch_one(pool)
            .await
    }

    /// Find an asset by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Asset>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM assets WHERE id = $1");
        sqlx::query_as::<_, Asset>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List assets with optional search and filters, newest first.
    pub async fn list(pool: &PgPool, params: &AssetListParams) -> Result<Vec<Asset>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM assets
             WHERE ($1::TEXT IS NULL OR name ILIKE $1 OR category ILIKE $1
                    OR manufacturer ILIKE $1 OR asset_tag ILIKE $1
                    OR serial ILIKE $1 OR model ILIKE $1)
               AND ($2::TEXT IS NULL OR status = $2)
               AND ($3::TEXT IS NULL OR category = $3)
               AND ($4::BIGINT IS NULL OR assigned_to = $4)
             ORDER BY created_at DESC, id DESC
             LIMIT $5 OFFSET $6"
        );
        sqlx::query_as::<_, Asset>(&query)
            .bind(search_pattern(params.search.as_deref()))
            .bind(&params.status)
            .bind(&params.category)
            .bind(params.assigned_to)
            .bind(clamp_limit(params.limit))
            .bind(clamp_offset(params.offset))
            .fetch_all(pool)
            .await
    }

    /// Every asset, for dashboard aggregation.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Asset>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM assets ORDER BY id");
        sqlx::query_as::<_, Asset>(&query).fetch_all(pool).await
    }

    /// Assets whose warranty ends within `[from, to]` (inclusive).
    pub async fn list_warranty_expiring(
        pool: &PgPool,
        from: Date,
        to: Date,
    ) -> Result<Vec<Asset>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM assets
             WHERE warranty_expiry BETWEEN $1 AND $2
             ORDER BY warranty_expiry, id"
        );
        sqlx::query_as::<_, Asset>(&query)
            .bind(from)
            .bind(to)
            .fetch_all(pool)
            .await
    }

    /// Assets currently assigned to a person.
    pub async fn list_for_person(
        pool: &PgPool,
        person_id: DbId,
    ) -> Result<Vec<Asset>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM assets WHERE assigned_to = $1 ORDER BY name");
        sqlx::query_as::<_, Asset>(&query)
            .bind(person_id)
            .fetch_all(pool)
            .await
    }

    /// Update an asset. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateAsset,
    ) -> Result<Option<Asset>, sqlx::Error> {
        let query = format!(
            "UPDATE assets SET
                name = COALESCE($2, name),
                asset_tag = COALESCE($3, asset_tag),
                serial = COALESCE($4, serial),
                model = COALESCE($5, model),
                category = COALESCE($6, category),
                manufacturer = COALESCE($7, manufacturer),
                status = COALESCE($8, status),
                location = COALESCE($9, location),
                assigned_to = COALESCE($10, assigned_to),
                purchase_date = COALESCE($11, purchase_date),
                purchase_cost = COALESCE($12, purchase_cost),
                warranty_expiry = COALESCE($13, warranty_expiry),
                notes = COALESCE($14, notes)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Asset>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.asset_tag)
            .bind(&input.serial)
            .bind(&input.model)
            .bind(&input.category)
            .bind(&input.manufacturer)
            .bind(&input.status)
            .bind(&input.location)
            .bind(input.assigned_to)
            .bind(input.purchase_date)
            .bind(input.purchase_cost)
            .bind(input.warranty_expiry)
            .bind(&input.notes)
            .fetch_optional(pool)
            .await
    }

    /// Delete an asset by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM assets WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
