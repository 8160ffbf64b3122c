//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

use assetrack_core::search::ilike_pattern;

pub mod accessory_repo;
pub mod alert_repo;
pub mod asset_repo;
pub mod change_log_repo;
pub mod compliance_repo;
pub mod component_repo;
pub mod consumable_repo;
pub mod import_record_repo;
pub mod integration_repo;
pub mod kit_repo;
pub mod license_repo;
pub mod maintenance_repo;
pub mod person_repo;
pub mod report_repo;
pub mod requestable_item_repo;
pub mod session_repo;
pub mod user_repo;

pub use accessory_repo::AccessoryRepo;
pub use alert_repo::AlertRepo;
pub use asset_repo::AssetRepo;
pub use change_log_repo::ChangeLogRepo;
pub use compliance_repo::{ComplianceCheckRepo, PolicyViolationRepo};
pub use component_repo::ComponentRepo;
pub use consumable_repo::ConsumableRepo;
pub use import_record_repo::ImportRecordRepo;
pub use integration_repo::IntegrationRepo;
pub use kit_repo::KitRepo;
pub use license_repo::LicenseRepo;
pub use maintenance_repo::MaintenanceRepo;
pub use person_repo::PersonRepo;
pub use report_repo::ReportRepo;
pub use requestable_item_repo::RequestableItemRepo;
pub use session_repo::SessionRepo;
pub use user_repo::UserRepo;

/// Turn an optional `?search=` value into a bindable `ILIKE` pattern.
///
/// Blank terms become `None` so the `$n::TEXT IS NULL OR ...` guard matches
/// every row.
pub(crate) fn search_pattern(search: Option<&str>) -> Option<String> {
    search
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ilike_pattern)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_search_is_no_filter() {
        assert_eq!(search_pattern(None), None);
        assert_eq!(search_pattern(Some("   ")), None);
    }

    #[test]
    fn search_is_wrapped_and_escaped() {
        assert_eq!(search_pattern(Some(" Dell ")).as_deref(), Some("%Dell%"));
        assert_eq!(search_pattern(Some("50%")).as_deref(), Some("%50\\%%"));
    }
}
