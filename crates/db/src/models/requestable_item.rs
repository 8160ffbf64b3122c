//! Requestable item models and DTOs.

use assetrack_core::search::Searchable;
use assetrack_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `requestable_items` table.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct RequestableItem {
    pub id: DbId,
    pub name: String,
    pub item_type: String,
    pub item_id: Option<DbId>,
    pub category: Option<String>,
    pub quantity_available: i32,
    pub is_requestable: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Searchable for RequestableItem {
    fn search_fields(&self) -> Vec<Option<&str>> {
        vec![
            Some(self.name.as_str()),
            self.category.as_deref(),
            Some(self.item_type.as_str()),
        ]
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct CreateRequestableItem {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    pub item_type: String,
    pub item_id: Option<DbId>,
    pub category: Option<String>,
    #[validate(range(min = 0))]
    pub quantity_available: Option<i32>,
    pub is_requestable: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
pub struct UpdateRequestableItem {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    pub item_type: Option<String>,
    pub item_id: Option<DbId>,
    pub category: Option<String>,
    #[validate(range(min = 0))]
    pub quantity_available: Option<i32>,
    pub is_requestable: Option<bool>,
}

/// Query parameters for listing requestable items.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RequestableItemListParams {
    pub search: Option<String>,
    pub item_type: Option<String>,
    /// When set, only rows currently open for requests.
    #[serde(default)]
    pub requestable_only: bool,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
