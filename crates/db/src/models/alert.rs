//! Alert models and DTOs.

use assetrack_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Alert type raised for an asset warranty inside the expiry window.
pub const ALERT_WARRANTY_EXPIRING: &str = "warranty_expiring";
/// Alert type raised for a license inside the expiry window.
pub const ALERT_LICENSE_EXPIRING: &str = "license_expiring";
/// Alert type raised for a consumable at or below its reorder threshold.
pub const ALERT_LOW_STOCK: &str = "low_stock";

/// A row from the `alerts` table.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Alert {
    pub id: DbId,
    pub alert_type: String,
    pub severity: String,
    pub title: String,
    pub message: Option<String>,
    pub entity_type: Option<String>,
    pub entity_id: Option<DbId>,
    pub is_resolved: bool,
    pub resolved_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct CreateAlert {
    #[validate(length(min = 1, max = 100))]
    pub alert_type: String,
    pub severity: Option<String>,
    #[validate(length(min = 1, max = 300))]
    pub title: String,
    pub message: Option<String>,
    pub entity_type: Option<String>,
    pub entity_id: Option<DbId>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
pub struct UpdateAlert {
    pub severity: Option<String>,
    #[validate(length(min = 1, max = 300))]
    pub title: Option<String>,
    pub message: Option<String>,
}

/// Query parameters for listing alerts.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AlertListParams {
    pub search: Option<String>,
    pub severity: Option<String>,
    pub alert_type: Option<String>,
    #[serde(default)]
    pub include_resolved: bool,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
