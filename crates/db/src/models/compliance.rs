//! Compliance check and policy violation models and DTOs.

use assetrack_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

// ---------------------------------------------------------------------------
// Compliance checks
// ---------------------------------------------------------------------------

/// A row from the `compliance_checks` table.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct ComplianceCheck {
    pub id: DbId,
    pub name: String,
    pub category: Option<String>,
    pub status: String,
    pub entity_type: Option<String>,
    pub entity_id: Option<DbId>,
    pub last_checked_at: Option<Timestamp>,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct CreateComplianceCheck {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    pub category: Option<String>,
    pub status: Option<String>,
    pub entity_type: Option<String>,
    pub entity_id: Option<DbId>,
    pub notes: Option<String>,
}

/// Setting `status` also stamps `last_checked_at`.
#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
pub struct UpdateComplianceCheck {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    pub category: Option<String>,
    pub status: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ComplianceCheckListParams {
    pub search: Option<String>,
    pub status: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

// ---------------------------------------------------------------------------
// Policy violations
// ---------------------------------------------------------------------------

/// A row from the `policy_violations` table.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct PolicyViolation {
    pub id: DbId,
    pub policy: String,
    pub severity: String,
    pub entity_type: Option<String>,
    pub entity_id: Option<DbId>,
    pub description: Option<String>,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct CreatePolicyViolation {
    #[validate(length(min = 1, max = 200))]
    pub policy: String,
    pub severity: Option<String>,
    pub entity_type: Option<String>,
    pub entity_id: Option<DbId>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
pub struct UpdatePolicyViolation {
    pub severity: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PolicyViolationListParams {
    pub search: Option<String>,
    pub severity: Option<String>,
    pub status: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}
