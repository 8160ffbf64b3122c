//! Integration models and DTOs.

use assetrack_core::search::Searchable;
use assetrack_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `integrations` table.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Integration {
    pub id: DbId,
    pub name: String,
    pub provider: String,
    pub status: String,
    pub base_url: Option<String>,
    /// JSON object mapping external column names to internal field names.
    pub field_mappings: serde_json::Value,
    pub last_sync_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Searchable for Integration {
    fn search_fields(&self) -> Vec<Option<&str>> {
        vec![Some(self.name.as_str()), Some(self.provider.as_str())]
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct CreateIntegration {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(min = 1, max = 100))]
    pub provider: String,
    pub status: Option<String>,
    #[validate(url)]
    pub base_url: Option<String>,
    pub field_mappings: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
pub struct UpdateIntegration {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    pub provider: Option<String>,
    pub status: Option<String>,
    #[validate(url)]
    pub base_url: Option<String>,
    pub field_mappings: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct IntegrationListParams {
    pub search: Option<String>,
    pub status: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Request body for previewing how sample rows map through an integration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MappingPreviewRequest {
    pub rows: Vec<serde_json::Value>,
}
