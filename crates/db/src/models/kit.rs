//! Predefined kit models and DTOs.
//!
//! A kit is a named bundle of items (e.g. "New engineer laptop kit") that
//! can be checked out together. Its items are stored inline as JSONB.

use assetrack_core::search::Searchable;
use assetrack_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use validator::Validate;

/// One line of a kit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct KitItem {
    /// One of the inventory item kinds (`asset`, `license`, ...).
    pub item_type: String,
    pub item_id: DbId,
    #[validate(range(min = 1))]
    pub quantity: i32,
}

/// A row from the `predefined_kits` table.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct PredefinedKit {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub items: Json<Vec<KitItem>>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Searchable for PredefinedKit {
    fn search_fields(&self) -> Vec<Option<&str>> {
        vec![Some(self.name.as_str()), self.description.as_deref()]
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct CreateKit {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    pub description: Option<String>,
    #[validate(nested)]
    #[serde(default)]
    pub items: Vec<KitItem>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
pub struct UpdateKit {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    pub description: Option<String>,
    #[validate(nested)]
    pub items: Option<Vec<KitItem>>,
}

/// Query parameters for listing kits.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct KitListParams {
    pub search: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
