//! Repository for the `maintenance_records` table.

use assetrack_core::types::DbId;
use sqlx::PgPool;

use super::search_pattern;
use crate::models::maintenance::{
    CreateMaintenanceRecord, MaintenanceListParams, MaintenanceRecord, UpdateMaintenanceRecord,
};
use crate::pagination::{clamp_limit, clamp_offset};

const COLUMNS: &str = "id, asset_id, maintenance_type, title, status, start_date, \
                        completion_date, cost, supplier, notes, created_at, updated_at";

/// Provides CRUD operations for maintenance records.
pub struct MaintenanceRepo;

impl MaintenanceRepo {
    /// Insert a new record. `status` defaults to `scheduled`.
    pub async fn create(
        pool: &PgPool,
        input: &CreateMaintenanceRecord,
    ) -> Result<MaintenanceRecord, sqlx::Error> {
        let query = format!(
            "INSERT INTO maintenance_records (asset_id, maintenance_type, title, status, \
                                              start_date, completion_date, cost, supplier, notes)
             VALUES ($1, $2, $3, COALESCE($4, 'scheduled'), $5, $6, $7, $8, $9)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MaintenanceRecord>(&query)
            .bind(input.asset_id)
            .bind(&input.maintenance_type)
            .bind(&input.title)
            .bind(&input.status)
            .bind(input.start_date)
            .bind(input.completion_date)
            .bind(input.cost)
            .bind(&input.supplier)
            .bind(&input.notes)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<MaintenanceRecord>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM maintenance_records WHERE id = $1");
        sqlx::query_as::<_, MaintenanceRecord>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(
        pool: &PgPool,
        params: &MaintenanceListParams,
    ) -> Result<Vec<MaintenanceRecord>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM maintenance_records
             WHERE ($1::TEXT IS NULL OR title ILIKE $1 OR supplier ILIKE $1
                    OR maintenance_type ILIKE $1)
               AND ($2::BIGINT IS NULL OR asset_id = $2)
               AND ($3::TEXT IS NULL OR status = $3)
             ORDER BY created_at DESC, id DESC
             LIMIT $4 OFFSET $5"
        );
        sqlx::query_as::<_, MaintenanceRecord>(&query)
            .bind(search_pattern(params.search.as_deref()))
            .bind(params.asset_id)
            .bind(&params.status)
            .bind(clamp_limit(params.limit))
            .bind(clamp_offset(params.offset))
            .fetch_all(pool)
            .await
    }

    /// Every maintenance record, for the maintenance dashboard.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<MaintenanceRecord>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM maintenance_records ORDER BY id");
        sqlx::query_as::<_, MaintenanceRecord>(&query)
            .fetch_all(pool)
            .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateMaintenanceRecord,
    ) -> Result<Option<MaintenanceRecord>, sqlx::Error> {
        let query = format!(
            "UPDATE maintenance_records SET
                maintenance_type = COALESCE($2, maintenance_type),
                title = COALESCE($3, title),
                status = COALESCE($4, status),
                start_date = COALESCE($5, start_date),
                completion_date = COALESCE($6, completion_date),
                cost = COALESCE($7, cost),
                supplier = COALESCE($8, supplier),
                notes = COALESCE($9, notes)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MaintenanceRecord>(&query)
            .bind(id)
            .bind(&input.maintenance_type)
            .bind(&input.title)
            .bind(&input.status)
            .bind(input.start_date)
            .bind(input.completion_date)
            .bind(input.cost)
            .bind(&input.supplier)
            .bind(&input.notes)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM maintenance_records WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
