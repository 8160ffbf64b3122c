//! Row-change events shared by the server's realtime feed and the client.
//!
//! Every successful create/update/delete publishes one [`ChangeEvent`]
//! naming the table and row it touched. Subscribers filter by table.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::DbId;

// ---------------------------------------------------------------------------
// Table names
// ---------------------------------------------------------------------------

pub const TABLE_ASSETS: &str = "assets";
pub const TABLE_LICENSES: &str = "licenses";
pub const TABLE_ACCESSORIES: &str = "accessories";
pub const TABLE_CONSUMABLES: &str = "consumables";
pub const TABLE_COMPONENTS: &str = "components";
pub const TABLE_PEOPLE: &str = "people";
pub const TABLE_KITS: &str = "predefined_kits";
pub const TABLE_REQUESTABLE_ITEMS: &str = "requestable_items";
pub const TABLE_ALERTS: &str = "alerts";
pub const TABLE_COMPLIANCE_CHECKS: &str = "compliance_checks";
pub const TABLE_POLICY_VIOLATIONS: &str = "policy_violations";
pub const TABLE_MAINTENANCE: &str = "maintenance_records";
pub const TABLE_INTEGRATIONS: &str = "integrations";
pub const TABLE_IMPORTS: &str = "import_records";
pub const TABLE_REPORTS: &str = "reports";

/// Tables that publish change events.
pub const WATCHED_TABLES: &[&str] = &[
    TABLE_ASSETS,
    TABLE_LICENSES,
    TABLE_ACCESSORIES,
    TABLE_CONSUMABLES,
    TABLE_COMPONENTS,
    TABLE_PEOPLE,
    TABLE_KITS,
    TABLE_REQUESTABLE_ITEMS,
    TABLE_ALERTS,
    TABLE_COMPLIANCE_CHECKS,
    TABLE_POLICY_VIOLATIONS,
    TABLE_MAINTENANCE,
    TABLE_INTEGRATIONS,
    TABLE_IMPORTS,
    TABLE_REPORTS,
];

// ---------------------------------------------------------------------------
// ChangeEvent
// ---------------------------------------------------------------------------

/// What happened to the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeAction {
    Insert,
    Update,
    Delete,
}

impl ChangeAction {
    /// Lower-case name as stored in `change_log.action`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Insert => "insert",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

/// One row change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeEvent {
    pub table: String,
    pub action: ChangeAction,
    pub record_id: DbId,
    /// User whose request caused the change, when known.
    pub actor_user_id: Option<DbId>,
    /// The row after the change (`null` for deletes).
    #[serde(default)]
    pub record: serde_json::Value,
    pub timestamp: DateTime<Utc>,
}

impl ChangeEvent {
    pub fn new(table: impl Into<String>, action: ChangeAction, record_id: DbId) -> Self {
        Self {
            table: table.into(),
            action,
            record_id,
            actor_user_id: None,
            record: serde_json::Value::Null,
            timestamp: Utc::now(),
        }
    }

    /// Attach the acting user.
    pub fn with_actor(mut self, user_id: DbId) -> Self {
        self.actor_user_id = Some(user_id);
        self
    }

    /// Attach the serialized row.
    pub fn with_record(mut self, record: serde_json::Value) -> Self {
        self.record = record;
        self
    }

    /// Whether a subscriber filtering on `table` (or on nothing) wants this event.
    pub fn matches_table(&self, table: Option<&str>) -> bool {
        table.is_none_or(|t| t == self.table)
    }
}
