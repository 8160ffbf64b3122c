//! Saved report definitions.

use assetrack_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `reports` table.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Report {
    pub id: DbId,
    pub name: String,
    pub report_type: String,
    pub parameters: serde_json::Value,
    pub last_generated_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct CreateReport {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    pub report_type: String,
    pub parameters: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
pub struct UpdateReport {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    pub report_type: Option<String>,
    pub parameters: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReportListParams {
    pub search: Option<String>,
    pub report_type: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
