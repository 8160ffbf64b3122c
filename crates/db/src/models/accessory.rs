//! Accessory models and DTOs.

use assetrack_core::metrics::InventoryRecord;
use assetrack_core::search::Searchable;
use assetrack_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `accessories` table.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Accessory {
    pub id: DbId,
    pub name: String,
    pub category: Option<String>,
    pub manufacturer: Option<String>,
    pub model: Option<String>,
    pub quantity: i32,
    pub available_quantity: i32,
    pub purchase_cost: Option<f64>,
    pub location: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl InventoryRecord for Accessory {
    fn monetary_value(&self) -> Option<f64> {
        self.purchase_cost
    }
}

impl Searchable for Accessory {
    fn search_fields(&self) -> Vec<Option<&str>> {
        vec![
            Some(self.name.as_str()),
            self.category.as_deref(),
            self.manufacturer.as_deref(),
            self.model.as_deref(),
        ]
    }
}

/// DTO for creating an accessory. `available_quantity` defaults to `quantity`.
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct CreateAccessory {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    pub category: Option<String>,
    pub manufacturer: Option<String>,
    pub model: Option<String>,
    #[validate(range(min = 0))]
    pub quantity: i32,
    #[validate(range(min = 0))]
    pub available_quantity: Option<i32>,
    pub purchase_cost: Option<f64>,
    pub location: Option<String>,
}

/// DTO for updating an accessory. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
pub struct UpdateAccessory {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    pub category: Option<String>,
    pub manufacturer: Option<String>,
    pub model: Option<String>,
    #[validate(range(min = 0))]
    pub quantity: Option<i32>,
    #[validate(range(min = 0))]
    pub available_quantity: Option<i32>,
    pub purchase_cost: Option<f64>,
    pub location: Option<String>,
}

/// Query parameters for listing accessories.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AccessoryListParams {
    pub search: Option<String>,
    pub category: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
