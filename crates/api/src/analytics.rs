//! Dashboard and report payloads.
//!
//! Each function loads the collections it needs and hands them to the pure
//! reducers in `assetrack_core::metrics`. Nothing is cached; every call
//! reflects the current rows.

use std::collections::BTreeMap;

use assetrack_core::inventory::{
    ASSET_DEPLOYED, MAINTENANCE_IN_PROGRESS, MAINTENANCE_SCHEDULED, REPORT_COMPLIANCE,
    REPORT_FINANCIAL, REPORT_INVENTORY_SUMMARY, REPORT_MAINTENANCE, REPORT_UTILIZATION,
};
use assetrack_core::metrics::{
    compute_dashboard_metrics, compute_utilization, group_by_field, sum_by_group, sum_field,
    summarize_compliance, utilization_percent, ComplianceSummary, DashboardMetrics,
    InventorySnapshot, UtilizationMetrics, ValueBreakdown,
};
use assetrack_core::types::Date;
use assetrack_db::models::asset::Asset;
use assetrack_db::repositories::{
    AccessoryRepo, AlertRepo, AssetRepo, ComplianceCheckRepo, ComponentRepo, ConsumableRepo,
    LicenseRepo, MaintenanceRepo, PersonRepo, PolicyViolationRepo,
};
use assetrack_db::DbPool;
use serde::Serialize;

use crate::error::{AppError, AppResult};

/// Asset columns `GET /dashboard/breakdown` can group by.
pub const BREAKDOWN_FIELDS: &[&str] = &["category", "status", "manufacturer", "location"];

/// Main dashboard summary as of `today`.
pub async fn dashboard_metrics(pool: &DbPool, today: Date) -> AppResult<DashboardMetrics> {
    let snapshot = InventorySnapshot::new()
        .with_assets(&AssetRepo::list_all(pool).await?)
        .with_licenses(&LicenseRepo::list_all(pool).await?)
        .with_accessories(&AccessoryRepo::list_all(pool).await?)
        .with_consumables(&ConsumableRepo::list_all(pool).await?)
        .with_components(&ComponentRepo::list_all(pool).await?)
        .with_user_count(PersonRepo::count(pool).await?.max(0) as usize);
    Ok(compute_dashboard_metrics(&snapshot, today))
}

/// Seat, stock and deployment utilization.
pub async fn utilization(pool: &DbPool) -> AppResult<UtilizationMetrics> {
    let licenses = LicenseRepo::list_all(pool).await?;
    let accessories = AccessoryRepo::list_all(pool).await?;
    let components = ComponentRepo::list_all(pool).await?;
    let assets = AssetRepo::list_all(pool).await?;

    let deployed = assets.iter().filter(|a| a.status == ASSET_DEPLOYED).count();

    Ok(UtilizationMetrics {
        license_seats: compute_utilization(
            &licenses,
            |l| f64::from(l.used_seats()),
            |l| f64::from(l.seats),
        ),
        accessories: compute_utilization(
            &accessories,
            |a| f64::from(a.quantity - a.available_quantity),
            |a| f64::from(a.quantity),
        ),
        components: compute_utilization(
            &components,
            |c| f64::from(c.quantity - c.available_quantity),
            |c| f64::from(c.quantity),
        ),
        assets_deployed: utilization_percent(deployed as f64, assets.len() as f64),
    })
}

/// Asset counts grouped by one of [`BREAKDOWN_FIELDS`].
pub async fn breakdown(pool: &DbPool, field: &str) -> AppResult<BTreeMap<String, usize>> {
    let key = breakdown_key(field)?;
    let assets = AssetRepo::list_all(pool).await?;
    Ok(group_by_field(&assets, key))
}

type AssetKey = fn(&Asset) -> Option<&str>;

fn breakdown_key(field: &str) -> AppResult<AssetKey> {
    let key: AssetKey = match field {
        "category" => |a| a.category.as_deref(),
        "status" => |a| Some(a.status.as_str()),
        "manufacturer" => |a| a.manufacturer.as_deref(),
        "location" => |a| a.location.as_deref(),
        other => {
            return Err(AppError::BadRequest(format!(
                "Unknown breakdown field '{other}'. Valid fields: {}",
                BREAKDOWN_FIELDS.join(", ")
            )))
        }
    };
    Ok(key)
}

/// Monetary view of the inventory.
#[derive(Debug, Clone, Serialize)]
pub struct FinancialSummary {
    /// Purchase cost across assets, licenses, accessories and components.
    pub total_value: f64,
    pub value_by_kind: ValueBreakdown,
    /// Asset purchase cost per category; uncategorized assets are omitted.
    pub asset_value_by_category: BTreeMap<String, f64>,
    /// `Σ unit_cost × quantity` over consumables on hand.
    pub consumable_stock_value: f64,
    /// Sum of maintenance record costs.
    pub maintenance_cost: f64,
}

pub async fn financials(pool: &DbPool, today: Date) -> AppResult<FinancialSummary> {
    let metrics = dashboard_metrics(pool, today).await?;
    let assets = AssetRepo::list_all(pool).await?;
    let consumables = ConsumableRepo::list_all(pool).await?;
    let maintenance = MaintenanceRepo::list_all(pool).await?;

    Ok(FinancialSummary {
        total_value: metrics.total_value,
        value_by_kind: metrics.value_by_kind,
        asset_value_by_category: sum_by_group(
            &assets,
            |a| a.category.as_deref(),
            |a| a.purchase_cost,
        ),
        consumable_stock_value: sum_field(&consumables, |c| {
            c.unit_cost.map(|cost| cost * f64::from(c.quantity))
        }),
        maintenance_cost: sum_field(&maintenance, |m| m.cost),
    })
}

/// Compliance check outcomes plus the open-issue counters beside them.
#[derive(Debug, Clone, Serialize)]
pub struct ComplianceOverview {
    pub checks: ComplianceSummary,
    pub open_violations: i64,
    pub open_alerts: i64,
}

pub async fn compliance(pool: &DbPool) -> AppResult<ComplianceOverview> {
    let statuses = ComplianceCheckRepo::list_statuses(pool).await?;
    Ok(ComplianceOverview {
        checks: summarize_compliance(statuses.iter().map(String::as_str)),
        open_violations: PolicyViolationRepo::count_open(pool).await?,
        open_alerts: AlertRepo::count_open(pool).await?,
    })
}

/// Maintenance workload and spend.
#[derive(Debug, Clone, Serialize)]
pub struct MaintenanceOverview {
    pub total_records: usize,
    pub by_status: BTreeMap<String, usize>,
    pub by_type: BTreeMap<String, usize>,
    /// Scheduled plus in-progress records.
    pub open_records: usize,
    pub total_cost: f64,
}

pub async fn maintenance(pool: &DbPool) -> AppResult<MaintenanceOverview> {
    let records = MaintenanceRepo::list_all(pool).await?;
    let by_status = group_by_field(&records, |m| Some(m.status.as_str()));
    let open_records = [MAINTENANCE_SCHEDULED, MAINTENANCE_IN_PROGRESS]
        .iter()
        .filter_map(|s| by_status.get(*s))
        .sum();

    Ok(MaintenanceOverview {
        total_records: records.len(),
        by_type: group_by_field(&records, |m| Some(m.maintenance_type.as_str())),
        by_status,
        open_records,
        total_cost: sum_field(&records, |m| m.cost),
    })
}

/// Compute the payload stored for a report of `report_type`.
pub async fn generate_report(
    pool: &DbPool,
    report_type: &str,
    today: Date,
) -> AppResult<serde_json::Value> {
    let payload = match report_type {
        REPORT_INVENTORY_SUMMARY => to_json(&dashboard_metrics(pool, today).await?)?,
        REPORT_FINANCIAL => to_json(&financials(pool, today).await?)?,
        REPORT_COMPLIANCE => to_json(&compliance(pool).await?)?,
        REPORT_MAINTENANCE => to_json(&maintenance(pool).await?)?,
        REPORT_UTILIZATION => to_json(&utilization(pool).await?)?,
        other => {
            return Err(AppError::BadRequest(format!(
                "Report type '{other}' cannot be generated"
            )))
        }
    };
    Ok(payload)
}

fn to_json<T: Serialize>(value: &T) -> AppResult<serde_json::Value> {
    serde_json::to_value(value)
        .map_err(|e| AppError::InternalError(format!("Report serialization failed: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn every_breakdown_field_resolves() {
        for field in BREAKDOWN_FIELDS {
            assert!(breakdown_key(field).is_ok(), "{field} should resolve");
        }
    }

    #[test]
    fn unknown_breakdown_field_is_bad_request() {
        assert_matches!(
            breakdown_key("color"),
            Err(AppError::BadRequest(msg)) if msg.contains("color")
        );
    }
}
