//! Component models and DTOs.

use assetrack_core::metrics::InventoryRecord;
use assetrack_core::search::Searchable;
use assetrack_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `components` table.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Component {
    pub id: DbId,
    pub name: String,
    pub category: Option<String>,
    pub manufacturer: Option<String>,
    pub serial: Option<String>,
    pub quantity: i32,
    pub available_quantity: i32,
    pub purchase_cost: Option<f64>,
    /// The asset this component is installed in, if any.
    pub asset_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl InventoryRecord for Component {
    fn monetary_value(&self) -> Option<f64> {
        self.purchase_cost
    }
}

impl Searchable for Component {
    fn search_fields(&self) -> Vec<Option<&str>> {
        vec![
            Some(self.name.as_str()),
            self.category.as_deref(),
            self.manufacturer.as_deref(),
            self.serial.as_deref(),
        ]
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct CreateComponent {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    pub category: Option<String>,
    pub manufacturer: Option<String>,
    pub serial: Option<String>,
    #[validate(range(min = 0))]
    pub quantity: i32,
    #[validate(range(min = 0))]
    pub available_quantity: Option<i32>,
    pub purchase_cost: Option<f64>,
    pub asset_id: Option<DbId>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
pub struct UpdateComponent {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    pub category: Option<String>,
    pub manufacturer: Option<String>,
    pub serial: Option<String>,
    #[validate(range(min = 0))]
    pub quantity: Option<i32>,
    #[validate(range(min = 0))]
    pub available_quantity: Option<i32>,
    pub purchase_cost: Option<f64>,
    pub asset_id: Option<DbId>,
}

/// Query parameters for listing components.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ComponentListParams {
    pub search: Option<String>,
    pub category: Option<String>,
    pub asset_id: Option<DbId>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
