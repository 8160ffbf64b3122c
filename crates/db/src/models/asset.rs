//! Asset models and DTOs.

use assetrack_core::metrics::InventoryRecord;
use assetrack_core::search::Searchable;
use assetrack_core::types::{Date, DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `assets` table.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Asset {
    pub id: DbId,
    pub name: String,
    pub asset_tag: String,
    pub serial: Option<String>,
    pub model: Option<String>,
    pub category: Option<String>,
    pub manufacturer: Option<String>,
    pub status: String,
    pub location: Option<String>,
    pub assigned_to: Option<DbId>,
    pub purchase_date: Option<Date>,
    pub purchase_cost: Option<f64>,
    pub warranty_expiry: Option<Date>,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl InventoryRecord for Asset {
    fn monetary_value(&self) -> Option<f64> {
        self.purchase_cost
    }

    fn expires_on(&self) -> Option<Date> {
        self.warranty_expiry
    }
}

impl Searchable for Asset {
    fn search_fields(&self) -> Vec<Option<&str>> {
        vec![
            Some(self.name.as_str()),
            self.category.as_deref(),
            self.manufacturer.as_deref(),
            Some(self.asset_tag.as_str()),
            self.serial.as_deref(),
            self.model.as_deref(),
        ]
    }
}

/// DTO for creating a new asset. `status` defaults to `ready_to_deploy`.
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct CreateAsset {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(min = 1, max = 100))]
    pub asset_tag: String,
    pub serial: Option<String>,
    pub model: Option<String>,
    pub category: Option<String>,
    pub manufacturer: Option<String>,
    pub status: Option<String>,
    pub location: Option<String>,
    pub assigned_to: Option<DbId>,
    pub purchase_date: Option<Date>,
    pub purchase_cost: Option<f64>,
    pub warranty_expiry: Option<Date>,
    pub notes: Option<String>,
}

/// DTO for updating an existing asset. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
pub struct UpdateAsset {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub asset_tag: Option<String>,
    pub serial: Option<String>,
    pub model: Option<String>,
    pub category: Option<String>,
    pub manufacturer: Option<String>,
    pub status: Option<String>,
    pub location: Option<String>,
    pub assigned_to: Option<DbId>,
    pub purchase_date: Option<Date>,
    pub purchase_cost: Option<f64>,
    pub warranty_expiry: Option<Date>,
    pub notes: Option<String>,
}

/// Query parameters for listing assets.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AssetListParams {
    /// Case-insensitive substring over name, category, manufacturer, tag, serial, model.
    pub search: Option<String>,
    pub status: Option<String>,
    pub category: Option<String>,
    pub assigned_to: Option<DbId>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
