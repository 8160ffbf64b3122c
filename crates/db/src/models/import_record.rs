//! Import run models and DTOs.

use assetrack_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `import_records` table.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct ImportRecord {
    pub id: DbId,
    pub integration_id: Option<DbId>,
    pub file_name: String,
    pub entity_type: String,
    pub status: String,
    pub total_rows: i32,
    pub imported_rows: i32,
    pub failed_rows: i32,
    pub error_summary: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct CreateImportRecord {
    pub integration_id: Option<DbId>,
    #[validate(length(min = 1, max = 500))]
    pub file_name: String,
    pub entity_type: String,
    #[validate(range(min = 0))]
    pub total_rows: Option<i32>,
}

/// Progress update for an import run.
#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
pub struct UpdateImportRecord {
    pub status: Option<String>,
    #[validate(range(min = 0))]
    pub total_rows: Option<i32>,
    #[validate(range(min = 0))]
    pub imported_rows: Option<i32>,
    #[validate(range(min = 0))]
    pub failed_rows: Option<i32>,
    pub error_summary: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImportListParams {
    pub search: Option<String>,
    pub integration_id: Option<DbId>,
    pub status: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
