//! Asset maintenance record models and DTOs.

use assetrack_core::types::{Date, DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `maintenance_records` table.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct MaintenanceRecord {
    pub id: DbId,
    pub asset_id: DbId,
    pub maintenance_type: String,
    pub title: String,
    pub status: String,
    pub start_date: Option<Date>,
    pub completion_date: Option<Date>,
    pub cost: Option<f64>,
    pub supplier: Option<String>,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct CreateMaintenanceRecord {
    pub asset_id: DbId,
    pub maintenance_type: String,
    #[validate(length(min = 1, max = 300))]
    pub title: String,
    pub status: Option<String>,
    pub start_date: Option<Date>,
    pub completion_date: Option<Date>,
    pub cost: Option<f64>,
    pub supplier: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
pub struct UpdateMaintenanceRecord {
    pub maintenance_type: Option<String>,
    #[validate(length(min = 1, max = 300))]
    pub title: Option<String>,
    pub status: Option<String>,
    pub start_date: Option<Date>,
    pub completion_date: Option<Date>,
    pub cost: Option<f64>,
    pub supplier: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MaintenanceListParams {
    pub search: Option<String>,
    pub asset_id: Option<DbId>,
    pub status: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
