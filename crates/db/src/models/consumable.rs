//! Consumable models and DTOs.

use assetrack_core::metrics::InventoryRecord;
use assetrack_core::search::Searchable;
use assetrack_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `consumables` table.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Consumable {
    pub id: DbId,
    pub name: String,
    pub category: Option<String>,
    pub manufacturer: Option<String>,
    pub quantity: i32,
    pub min_quantity: i32,
    pub unit_cost: Option<f64>,
    pub location: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl InventoryRecord for Consumable {
    fn monetary_value(&self) -> Option<f64> {
        self.unit_cost.map(|c| c * f64::from(self.quantity))
    }

    fn is_low_stock(&self) -> bool {
        self.quantity <= self.min_quantity
    }
}

impl Searchable for Consumable {
    fn search_fields(&self) -> Vec<Option<&str>> {
        vec![
            Some(self.name.as_str()),
            self.category.as_deref(),
            self.manufacturer.as_deref(),
        ]
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct CreateConsumable {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    pub category: Option<String>,
    pub manufacturer: Option<String>,
    #[validate(range(min = 0))]
    pub quantity: i32,
    #[validate(range(min = 0))]
    pub min_quantity: Option<i32>,
    pub unit_cost: Option<f64>,
    pub location: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
pub struct UpdateConsumable {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    pub category: Option<String>,
    pub manufacturer: Option<String>,
    #[validate(range(min = 0))]
    pub quantity: Option<i32>,
    #[validate(range(min = 0))]
    pub min_quantity: Option<i32>,
    pub unit_cost: Option<f64>,
    pub location: Option<String>,
}

/// Query parameters for listing consumables.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConsumableListParams {
    pub search: Option<String>,
    pub category: Option<String>,
    /// Only rows at or below their reorder threshold.
    #[serde(default)]
    pub low_stock: bool,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
