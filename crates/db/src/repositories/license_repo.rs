//! Repository for the `licenses` table, including seat checkout/checkin.

use assetrack_core::types::{Date, DbId};
use sqlx::PgPool;

use super::search_pattern;
use crate::models::license::{CreateLicense, License, LicenseListParams, UpdateLicense};
use crate::pagination::{clamp_limit, clamp_offset};

const COLUMNS: &str = "id, name, product_key, manufacturer, category, seats, available_seats, \
                        purchase_cost, purchase_date, expiration_date, assigned_to, notes, \
                        created_at, updated_at";

/// Provides CRUD and seat accounting for licenses.
pub struct LicenseRepo;

impl LicenseRepo {
    /// Insert a new license. `available_seats` defaults to `seats`.
    pub async fn create(pool: &PgPool, input: &CreateLicense) -> Result<License, sqlx::Error> {
        let query = format!(
            "INSERT INTO licenses (name, product_key, manufacturer, category, seats, \
                                   available_seats, purchase_cost, purchase_date, \
                                   expiration_date, assigned_to, notes)
             VALUES ($1, $2, $3, $4, $5, COALESCE($6, $5), $7, $8, $9, $10, $11)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, License>(&query)
            .bind(&input.name)
            .bind(&input.product_key)
            .bind(&input.manufacturer)
            .bind(&input.category)
            .bind(input.seats)
            .bind(input.available_seats)
            .bind(input.purchase_cost)
            .bind(input.purchase_date)
            .bind(input.expiration_date)
            .bind(input.assigned_to)
            .bind(&input.notes)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<License>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM licenses WHERE id = $1");
        sqlx::query_as::<_, License>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List licenses with optional search and filters, newest first.
    pub async fn list(
        pool: &PgPool,
        params: &LicenseListParams,
    ) -> Result<Vec<License>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM licenses
             WHERE ($1::TEXT IS NULL OR name ILIKE $1 OR category ILIKE $1 OR manufacturer ILIKE $1)
               AND ($2::TEXT IS NULL OR category = $2)
               AND (NOT $3 OR available_seats > 0)
             ORDER BY created_at DESC, id DESC
             LIMIT $4 OFFSET $5"
        );
        sqlx::query_as::<_, License>(&query)
            .bind(search_pattern(params.search.as_deref()))
            .bind(&params.category)
            .bind(params.available_only)
            .bind(clamp_limit(params.limit))
            .bind(clamp_offset(params.offset))
            .fetch_all(pool)
            .await
    }

    /// Every license, for dashboard aggregation.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<License>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM licenses ORDER BY id");
        sqlx::query_as::<_, License>(&query).fetch_all(pool).await
    }

    /// Licenses whose expiration date falls within `[from, to]` (inclusive).
    pub async fn list_expiring(
        pool: &PgPool,
        from: Date,
        to: Date,
    ) -> Result<Vec<License>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM licenses
             WHERE expiration_date BETWEEN $1 AND $2
             ORDER BY expiration_date, id"
        );
        sqlx::query_as::<_, License>(&query)
            .bind(from)
            .bind(to)
            .fetch_all(pool)
            .await
    }

    /// Licenses assigned to a person.
    pub async fn list_for_person(
        pool: &PgPool,
        person_id: DbId,
    ) -> Result<Vec<License>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM licenses WHERE assigned_to = $1 ORDER BY name");
        sqlx::query_as::<_, License>(&query)
            .bind(person_id)
            .fetch_all(pool)
            .await
    }

    /// Update a license. Only non-`None` fields in `input` are applied.
    ///
    /// The caller is expected to have validated the merged seat pair; the
    /// table's CHECK constraint still rejects an inconsistent result.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateLicense,
    ) -> Result<Option<License>, sqlx::Error> {
        let query = format!(
            "UPDATE licenses SET
                name = COALESCE($2, name),
                product_key = COALESCE($3, product_key),
                manufacturer = COALESCE($4, manufacturer),
                category = COALESCE($5, category),
                seats = COALESCE($6, seats),
                available_seats = COALESCE($7, available_seats),
                purchase_cost = COALESCE($8, purchase_cost),
                purchase_date = COALESCE($9, purchase_date),
                expiration_date = COALESCE($10, expiration_date),
                assigned_to = COALESCE($11, assigned_to),
                notes = COALESCE($12, notes)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, License>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.product_key)
            .bind(&input.manufacturer)
            .bind(&input.category)
            .bind(input.seats)
            .bind(input.available_seats)
            .bind(input.purchase_cost)
            .bind(input.purchase_date)
            .bind(input.expiration_date)
            .bind(input.assigned_to)
            .bind(&input.notes)
            .fetch_optional(pool)
            .await
    }

    /// Take one seat. Returns `None` when the license does not exist or has
    /// no free seat; the decrement is a single conditional UPDATE so
    /// concurrent checkouts never drive `available_seats` below zero.
    pub async fn checkout_seat(pool: &PgPool, id: DbId) -> Result<Option<License>, sqlx::Error> {
        let query = format!(
            "UPDATE licenses SET available_seats = available_seats - 1
             WHERE id = $1 AND available_seats > 0
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, License>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Return one seat. Returns `None` when the license does not exist or
    /// all seats are already available.
    pub async fn checkin_seat(pool: &PgPool, id: DbId) -> Result<Option<License>, sqlx::Error> {
        let query = format!(
            "UPDATE licenses SET available_seats = available_seats + 1
             WHERE id = $1 AND available_seats < seats
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, License>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM licenses WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
