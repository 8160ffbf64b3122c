//! Inventory status vocabularies and record validators.
//!
//! Status-like columns are stored as TEXT with a CHECK constraint; the
//! constants here must stay in sync with the migrations. The validators
//! enforce the invariants that the database does not express on its own
//! (seat and quantity ceilings).

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Asset statuses
// ---------------------------------------------------------------------------

pub const ASSET_READY_TO_DEPLOY: &str = "ready_to_deploy";
pub const ASSET_DEPLOYED: &str = "deployed";
pub const ASSET_PENDING: &str = "pending";
pub const ASSET_IN_REPAIR: &str = "in_repair";
pub const ASSET_ARCHIVED: &str = "archived";
pub const ASSET_LOST: &str = "lost";
pub const ASSET_RETIRED: &str = "retired";

/// All valid asset statuses.
pub const VALID_ASSET_STATUSES: &[&str] = &[
    ASSET_READY_TO_DEPLOY,
    ASSET_DEPLOYED,
    ASSET_PENDING,
    ASSET_IN_REPAIR,
    ASSET_ARCHIVED,
    ASSET_LOST,
    ASSET_RETIRED,
];

// ---------------------------------------------------------------------------
// Severities (alerts, policy violations)
// ---------------------------------------------------------------------------

pub const SEVERITY_LOW: &str = "low";
pub const SEVERITY_MEDIUM: &str = "medium";
pub const SEVERITY_HIGH: &str = "high";
pub const SEVERITY_CRITICAL: &str = "critical";

pub const VALID_SEVERITIES: &[&str] =
    &[SEVERITY_LOW, SEVERITY_MEDIUM, SEVERITY_HIGH, SEVERITY_CRITICAL];

// ---------------------------------------------------------------------------
// Compliance
// ---------------------------------------------------------------------------

pub const COMPLIANCE_PASSED: &str = "passed";
pub const COMPLIANCE_FAILED: &str = "failed";
pub const COMPLIANCE_PENDING: &str = "pending";

pub const VALID_COMPLIANCE_STATUSES: &[&str] =
    &[COMPLIANCE_PASSED, COMPLIANCE_FAILED, COMPLIANCE_PENDING];

pub const VIOLATION_OPEN: &str = "open";
pub const VIOLATION_RESOLVED: &str = "resolved";

pub const VALID_VIOLATION_STATUSES: &[&str] = &[VIOLATION_OPEN, VIOLATION_RESOLVED];

// ---------------------------------------------------------------------------
// Maintenance
// ---------------------------------------------------------------------------

pub const MAINTENANCE_SCHEDULED: &str = "scheduled";
pub const MAINTENANCE_IN_PROGRESS: &str = "in_progress";
pub const MAINTENANCE_COMPLETED: &str = "completed";
pub const MAINTENANCE_CANCELLED: &str = "cancelled";

pub const VALID_MAINTENANCE_STATUSES: &[&str] = &[
    MAINTENANCE_SCHEDULED,
    MAINTENANCE_IN_PROGRESS,
    MAINTENANCE_COMPLETED,
    MAINTENANCE_CANCELLED,
];

pub const VALID_MAINTENANCE_TYPES: &[&str] =
    &["repair", "upgrade", "calibration", "inspection", "software_support", "other"];

// ---------------------------------------------------------------------------
// Integrations and imports
// ---------------------------------------------------------------------------

pub const INTEGRATION_ACTIVE: &str = "active";
pub const INTEGRATION_INACTIVE: &str = "inactive";
pub const INTEGRATION_ERROR: &str = "error";

pub const VALID_INTEGRATION_STATUSES: &[&str] =
    &[INTEGRATION_ACTIVE, INTEGRATION_INACTIVE, INTEGRATION_ERROR];

pub const IMPORT_PENDING: &str = "pending";
pub const IMPORT_PROCESSING: &str = "processing";
pub const IMPORT_COMPLETED: &str = "completed";
pub const IMPORT_FAILED: &str = "failed";

pub const VALID_IMPORT_STATUSES: &[&str] =
    &[IMPORT_PENDING, IMPORT_PROCESSING, IMPORT_COMPLETED, IMPORT_FAILED];

// ---------------------------------------------------------------------------
// Item kinds (kits, requestable items, imports, alerts)
// ---------------------------------------------------------------------------

pub const KIND_ASSET: &str = "asset";
pub const KIND_LICENSE: &str = "license";
pub const KIND_ACCESSORY: &str = "accessory";
pub const KIND_CONSUMABLE: &str = "consumable";
pub const KIND_COMPONENT: &str = "component";

pub const VALID_ITEM_KINDS: &[&str] = &[
    KIND_ASSET,
    KIND_LICENSE,
    KIND_ACCESSORY,
    KIND_CONSUMABLE,
    KIND_COMPONENT,
];

// ---------------------------------------------------------------------------
// Reports
// ---------------------------------------------------------------------------

pub const REPORT_INVENTORY_SUMMARY: &str = "inventory_summary";
pub const REPORT_FINANCIAL: &str = "financial";
pub const REPORT_COMPLIANCE: &str = "compliance";
pub const REPORT_MAINTENANCE: &str = "maintenance";
pub const REPORT_UTILIZATION: &str = "utilization";

pub const VALID_REPORT_TYPES: &[&str] = &[
    REPORT_INVENTORY_SUMMARY,
    REPORT_FINANCIAL,
    REPORT_COMPLIANCE,
    REPORT_MAINTENANCE,
    REPORT_UTILIZATION,
];

// ---------------------------------------------------------------------------
// Validation functions
// ---------------------------------------------------------------------------

/// Check that `value` is one of `valid`, naming `field` in the error.
pub fn validate_one_of(field: &str, value: &str, valid: &[&str]) -> Result<(), CoreError> {
    if valid.contains(&value) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid {field}: '{value}'. Valid values: {}",
            valid.join(", ")
        )))
    }
}

/// Like [`validate_one_of`] but passes when the value is absent.
pub fn validate_optional_one_of(
    field: &str,
    value: Option<&str>,
    valid: &[&str],
) -> Result<(), CoreError> {
    match value {
        Some(v) => validate_one_of(field, v, valid),
        None => Ok(()),
    }
}

/// Validate a license's seat pair: both non-negative, available <= total.
pub fn validate_seats(seats: i32, available_seats: i32) -> Result<(), CoreError> {
    if seats < 0 || available_seats < 0 {
        return Err(CoreError::Validation(
            "Seat counts must not be negative".to_string(),
        ));
    }
    if available_seats > seats {
        return Err(CoreError::Validation(format!(
            "Available seats ({available_seats}) cannot exceed total seats ({seats})"
        )));
    }
    Ok(())
}

/// Validate a stocked item's quantity pair: both non-negative, available <= total.
pub fn validate_quantities(quantity: i32, available_quantity: i32) -> Result<(), CoreError> {
    if quantity < 0 || available_quantity < 0 {
        return Err(CoreError::Validation(
            "Quantities must not be negative".to_string(),
        ));
    }
    if available_quantity > quantity {
        return Err(CoreError::Validation(format!(
            "Available quantity ({available_quantity}) cannot exceed quantity ({quantity})"
        )));
    }
    Ok(())
}

/// Reject negative monetary amounts.
pub fn validate_cost(field: &str, cost: Option<f64>) -> Result<(), CoreError> {
    match cost {
        Some(c) if c < 0.0 || !c.is_finite() => Err(CoreError::Validation(format!(
            "{field} must be a non-negative amount"
        ))),
        _ => Ok(()),
    }
}

/// Resolve the seat pair a license update would produce and validate it.
///
/// `current` is the stored `(seats, available_seats)`; absent update fields
/// keep their stored value.
pub fn merged_seats(
    current: (i32, i32),
    seats: Option<i32>,
    available_seats: Option<i32>,
) -> Result<(i32, i32), CoreError> {
    let merged = (seats.unwrap_or(current.0), available_seats.unwrap_or(current.1));
    validate_seats(merged.0, merged.1)?;
    Ok(merged)
}

/// Resolve and validate the quantity pair an accessory/component update would produce.
pub fn merged_quantities(
    current: (i32, i32),
    quantity: Option<i32>,
    available_quantity: Option<i32>,
) -> Result<(i32, i32), CoreError> {
    let merged = (
        quantity.unwrap_or(current.0),
        available_quantity.unwrap_or(current.1),
    );
    validate_quantities(merged.0, merged.1)?;
    Ok(merged)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
