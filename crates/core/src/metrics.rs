//! Dashboard metrics aggregation.
//!
//! Everything here is a pure reduction over in-memory records: counts,
//! sums, percentages and groupings recomputed from scratch on every call.
//! Absent numeric fields count as zero and absent dates are ignored; no
//! function in this module can fail.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::types::Date;

/// Lookahead used to flag warranties and licenses nearing expiry.
pub const EXPIRING_WINDOW_DAYS: i64 = 30;

// ---------------------------------------------------------------------------
// Record facts
// ---------------------------------------------------------------------------

/// The fields the aggregator reads from an inventory row.
///
/// Implemented by the database models; every method defaults to "absent".
pub trait InventoryRecord {
    /// Purchase cost (or equivalent monetary amount).
    fn monetary_value(&self) -> Option<f64> {
        None
    }

    /// Warranty or license expiry date.
    fn expires_on(&self) -> Option<Date> {
        None
    }

    /// Whether the stock level is at or below its reorder threshold.
    fn is_low_stock(&self) -> bool {
        false
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct RecordFacts {
    value: Option<f64>,
    expires_on: Option<Date>,
    low_stock: bool,
}

impl RecordFacts {
    fn of<R: InventoryRecord>(record: &R) -> Self {
        Self {
            value: record.monetary_value(),
            expires_on: record.expires_on(),
            low_stock: record.is_low_stock(),
        }
    }

    fn collect<R: InventoryRecord>(records: &[R]) -> Vec<Self> {
        records.iter().map(Self::of).collect()
    }
}

/// Snapshot of every collection the dashboard summarizes.
///
/// Built with the `with_*` methods so callers can pass whatever row types
/// they hold, as long as they implement [`InventoryRecord`].
#[derive(Debug, Clone, Default)]
pub struct InventorySnapshot {
    assets: Vec<RecordFacts>,
    licenses: Vec<RecordFacts>,
    accessories: Vec<RecordFacts>,
    consumables: Vec<RecordFacts>,
    components: Vec<RecordFacts>,
    users: usize,
}

impl InventorySnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_assets<R: InventoryRecord>(mut self, records: &[R]) -> Self {
        self.assets = RecordFacts::collect(records);
        self
    }

    pub fn with_licenses<R: InventoryRecord>(mut self, records: &[R]) -> Self {
        self.licenses = RecordFacts::collect(records);
        self
    }

    pub fn with_accessories<R: InventoryRecord>(mut self, records: &[R]) -> Self {
        self.accessories = RecordFacts::collect(records);
        self
    }

    pub fn with_consumables<R: InventoryRecord>(mut self, records: &[R]) -> Self {
        self.consumables = RecordFacts::collect(records);
        self
    }

    pub fn with_components<R: InventoryRecord>(mut self, records: &[R]) -> Self {
        self.components = RecordFacts::collect(records);
        self
    }

    /// People/users are only counted.
    pub fn with_user_count(mut self, count: usize) -> Self {
        self.users = count;
        self
    }
}

// ---------------------------------------------------------------------------
// Dashboard metrics
// ---------------------------------------------------------------------------

/// Row counts per collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CollectionCounts {
    pub assets: usize,
    pub licenses: usize,
    pub accessories: usize,
    pub consumables: usize,
    pub components: usize,
    pub users: usize,
}

/// Monetary totals for the collections that carry a purchase cost.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValueBreakdown {
    pub assets: f64,
    pub licenses: f64,
    pub accessories: f64,
    pub components: f64,
}

/// Summary numbers shown on the main dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardMetrics {
    pub counts: CollectionCounts,
    /// Sum of `value_by_kind`.
    pub total_value: f64,
    pub value_by_kind: ValueBreakdown,
    /// Assets whose warranty ends within the window.
    pub expiring_warranties: usize,
    /// Licenses whose expiration date falls within the window.
    pub expiring_licenses: usize,
    pub expired_warranties: usize,
    pub expired_licenses: usize,
    pub low_stock_consumables: usize,
    pub window_days: i64,
}

/// Compute the main dashboard summary for `snapshot` as of `today`.
pub fn compute_dashboard_metrics(snapshot: &InventorySnapshot, today: Date) -> DashboardMetrics {
    let value_by_kind = ValueBreakdown {
        assets: sum_field(&snapshot.assets, |f| f.value),
        licenses: sum_field(&snapshot.licenses, |f| f.value),
        accessories: sum_field(&snapshot.accessories, |f| f.value),
        components: sum_field(&snapshot.components, |f| f.value),
    };
    let total_value = value_by_kind.assets
        + value_by_kind.licenses
        + value_by_kind.accessories
        + value_by_kind.components;

    DashboardMetrics {
        counts: CollectionCounts {
            assets: snapshot.assets.len(),
            licenses: snapshot.licenses.len(),
            accessories: snapshot.accessories.len(),
            consumables: snapshot.consumables.len(),
            components: snapshot.components.len(),
            users: snapshot.users,
        },
        total_value,
        value_by_kind,
        expiring_warranties: count_expiring(&snapshot.assets, today),
        expiring_licenses: count_expiring(&snapshot.licenses, today),
        expired_warranties: count_expired(&snapshot.assets, today),
        expired_licenses: count_expired(&snapshot.licenses, today),
        low_stock_consumables: snapshot.consumables.iter().filter(|f| f.low_stock).count(),
        window_days: EXPIRING_WINDOW_DAYS,
    }
}

fn count_expiring(facts: &[RecordFacts], today: Date) -> usize {
    facts
        .iter()
        .filter_map(|f| f.expires_on)
        .filter(|d| is_expiring_soon(*d, today, EXPIRING_WINDOW_DAYS))
        .count()
}

fn count_expired(facts: &[RecordFacts], today: Date) -> usize {
    facts
        .iter()
        .filter_map(|f| f.expires_on)
        .filter(|d| *d < today)
        .count()
}

/// Whether `date` lies in `[today, today + window_days]`.
///
/// Dates already in the past are expired, not expiring.
pub fn is_expiring_soon(date: Date, today: Date, window_days: i64) -> bool {
    date >= today && date <= today + chrono::Duration::days(window_days)
}

// ---------------------------------------------------------------------------
// Generic reducers
// ---------------------------------------------------------------------------

/// `Σ (field ?? 0)` over `records`.
pub fn sum_field<R, F>(records: &[R], field: F) -> f64
where
    F: Fn(&R) -> Option<f64>,
{
    records.iter().map(|r| field(r).unwrap_or(0.0)).sum()
}

/// `used / total * 100`, or `0.0` when `total` is zero.
pub fn utilization_percent(used: f64, total: f64) -> f64 {
    if total == 0.0 {
        0.0
    } else {
        used / total * 100.0
    }
}

/// Aggregate utilization across `records`: `Σused / Σtotal * 100`.
///
/// Returns `0.0` for an empty collection or a zero total.
pub fn compute_utilization<R, U, T>(records: &[R], used: U, total: T) -> f64
where
    U: Fn(&R) -> f64,
    T: Fn(&R) -> f64,
{
    let (used_sum, total_sum) = records
        .iter()
        .fold((0.0, 0.0), |(u, t), r| (u + used(r), t + total(r)));
    utilization_percent(used_sum, total_sum)
}

/// Tally records by the value of `field`. Records with no value are skipped.
pub fn group_by_field<R, F>(records: &[R], field: F) -> BTreeMap<String, usize>
where
    F: Fn(&R) -> Option<&str>,
{
    let mut counts = BTreeMap::new();
    for value in records.iter().filter_map(|r| field(r)) {
        *counts.entry(value.to_string()).or_insert(0) += 1;
    }
    counts
}

/// Sum `value` per distinct `key`. Records with no key are skipped.
pub fn sum_by_group<R, K, V>(records: &[R], key: K, value: V) -> BTreeMap<String, f64>
where
    K: Fn(&R) -> Option<&str>,
    V: Fn(&R) -> Option<f64>,
{
    let mut sums = BTreeMap::new();
    for record in records {
        if let Some(k) = key(record) {
            *sums.entry(k.to_string()).or_insert(0.0) += value(record).unwrap_or(0.0);
        }
    }
    sums
}

// ---------------------------------------------------------------------------
// Utilization
// ---------------------------------------------------------------------------

/// Seat/stock utilization per collection, as percentages.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UtilizationMetrics {
    pub license_seats: f64,
    pub accessories: f64,
    pub components: f64,
    /// Share of assets in the `deployed` status.
    pub assets_deployed: f64,
}

// ---------------------------------------------------------------------------
// Compliance
// ---------------------------------------------------------------------------

/// Outcome counts over a set of compliance check statuses.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ComplianceSummary {
    pub passed: usize,
    pub failed: usize,
    pub pending: usize,
    /// `passed / (passed + failed) * 100`; pending checks are not scored.
    pub compliance_rate: f64,
}

/// Summarize compliance check statuses (`passed`, `failed`, `pending`).
///
/// Unknown statuses are ignored.
pub fn summarize_compliance<'a, I>(statuses: I) -> ComplianceSummary
where
    I: IntoIterator<Item = &'a str>,
{
    let mut summary = ComplianceSummary::default();
    for status in statuses {
        match status {
            crate::inventory::COMPLIANCE_PASSED => summary.passed += 1,
            crate::inventory::COMPLIANCE_FAILED => summary.failed += 1,
            crate::inventory::COMPLIANCE_PENDING => summary.pending += 1,
            _ => {}
        }
    }
    summary.compliance_rate = utilization_percent(
        summary.passed as f64,
        (summary.passed + summary.failed) as f64,
    );
    summary
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Row {
        cost: Option<f64>,
        expiry: Option<Date>,
        category: Option<&'static str>,
        low: bool,
    }

    impl InventoryRecord for Row {
        fn monetary_value(&self) -> Option<f64> {
            self.cost
        }
        fn expires_on(&self) -> Option<Date> {
            self.expiry
        }
        fn is_low_stock(&self) -> bool {
            self.low
        }
    }

    fn today() -> Date {
        Date::from_ymd_opt(2026, 3, 1).unwrap()
    }

    fn days_ahead(n: i64) -> Option<Date> {
        Some(today() + chrono::Duration::days(n))
    }

    fn costed(cost: Option<f64>) -> Row {
        Row {
            cost,
            ..Default::default()
        }
    }

    fn in_category(category: Option<&'static str>, cost: Option<f64>) -> Row {
        Row {
            category,
            cost,
            ..Default::default()
        }
    }

    fn expiring(cost: Option<f64>, expiry: Option<Date>) -> Row {
        Row {
            cost,
            expiry,
            ..Default::default()
        }
    }

    // -- sum_field --------------------------------------------------------

    #[test]
    fn missing_cost_counts_as_zero() {
        let rows = vec![costed(Some(10.0)), costed(None), costed(Some(5.0))];
        assert_eq!(sum_field(&rows, |r| r.cost), 15.0);
    }

    #[test]
    fn sum_of_empty_collection_is_zero() {
        let rows: Vec<Row> = Vec::new();
        assert_eq!(sum_field(&rows, |r| r.cost), 0.0);
    }

    #[test]
    fn sum_matches_manual_fold() {
        let rows: Vec<Row> = (0..20)
            .map(|i| costed(if i % 3 == 0 { None } else { Some(i as f64 * 1.5) }))
            .collect();
        let expected: f64 = rows.iter().map(|r| r.cost.unwrap_or(0.0)).sum();
        assert_eq!(sum_field(&rows, |r| r.cost), expected);
    }

    // -- utilization ------------------------------------------------------

    #[test]
    fn zero_total_utilization_is_zero() {
        assert_eq!(utilization_percent(0.0, 0.0), 0.0);
        assert_eq!(utilization_percent(7.0, 0.0), 0.0);
    }

    #[test]
    fn utilization_is_percentage() {
        assert_eq!(utilization_percent(3.0, 4.0), 75.0);
    }

    #[test]
    fn aggregate_utilization_sums_before_dividing() {
        // (used, total)
        let rows = vec![(1.0, 10.0), (9.0, 10.0), (0.0, 0.0)];
        let pct = compute_utilization(&rows, |r| r.0, |r| r.1);
        assert_eq!(pct, 50.0);
    }

    #[test]
    fn aggregate_utilization_of_empty_is_zero() {
        let rows: Vec<(f64, f64)> = Vec::new();
        assert_eq!(compute_utilization(&rows, |r| r.0, |r| r.1), 0.0);
    }

    // -- grouping ---------------------------------------------------------

    #[test]
    fn group_by_empty_is_empty() {
        let rows: Vec<Row> = Vec::new();
        assert!(group_by_field(&rows, |r| r.category).is_empty());
    }

    #[test]
    fn group_by_counts_values_and_skips_absent() {
        let rows = vec![
            in_category(Some("laptop"), None),
            in_category(Some("monitor"), None),
            in_category(Some("laptop"), None),
            in_category(None, None),
        ];
        let groups = group_by_field(&rows, |r| r.category);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups["laptop"], 2);
        assert_eq!(groups["monitor"], 1);
    }

    #[test]
    fn sum_by_group_accumulates_per_key() {
        let rows = vec![
            in_category(Some("laptop"), Some(1000.0)),
            in_category(Some("laptop"), None),
            in_category(Some("phone"), Some(300.0)),
        ];
        let sums = sum_by_group(&rows, |r| r.category, |r| r.cost);
        assert_eq!(sums["laptop"], 1000.0);
        assert_eq!(sums["phone"], 300.0);
    }

    // -- expiry window ----------------------------------------------------

    #[test]
    fn ten_days_out_is_expiring() {
        let date = days_ahead(10).unwrap();
        assert!(is_expiring_soon(date, today(), EXPIRING_WINDOW_DAYS));
    }

    #[test]
    fn forty_days_out_is_not_expiring() {
        let date = days_ahead(40).unwrap();
        assert!(!is_expiring_soon(date, today(), EXPIRING_WINDOW_DAYS));
    }

    #[test]
    fn window_bounds_are_inclusive() {
        assert!(is_expiring_soon(today(), today(), EXPIRING_WINDOW_DAYS));
        assert!(is_expiring_soon(days_ahead(30).unwrap(), today(), EXPIRING_WINDOW_DAYS));
        assert!(!is_expiring_soon(days_ahead(31).unwrap(), today(), EXPIRING_WINDOW_DAYS));
        assert!(!is_expiring_soon(days_ahead(-1).unwrap(), today(), EXPIRING_WINDOW_DAYS));
    }

    // -- compute_dashboard_metrics ---------------------------------------

    #[test]
    fn empty_snapshot_yields_zeroes() {
        let metrics = compute_dashboard_metrics(&InventorySnapshot::new(), today());
        assert_eq!(metrics.counts, CollectionCounts::default());
        assert_eq!(metrics.total_value, 0.0);
        assert_eq!(metrics.expiring_warranties, 0);
        assert_eq!(metrics.window_days, 30);
    }

    #[test]
    fn dashboard_counts_sums_and_expiry() {
        let assets = vec![
            expiring(Some(1200.0), days_ahead(10)),
            expiring(Some(800.0), days_ahead(40)),
            expiring(None, days_ahead(-5)),
        ];
        let licenses = vec![
            expiring(Some(99.5), days_ahead(29)),
            expiring(Some(0.5), None),
        ];
        let accessories = vec![costed(Some(25.0))];
        let consumables = vec![
            Row {
                cost: Some(1000.0),
                low: true,
                ..Default::default()
            },
            Row::default(),
        ];
        let components = vec![costed(Some(75.0)), costed(None)];

        let snapshot = InventorySnapshot::new()
            .with_assets(&assets)
            .with_licenses(&licenses)
            .with_accessories(&accessories)
            .with_consumables(&consumables)
            .with_components(&components)
            .with_user_count(4);

        let metrics = compute_dashboard_metrics(&snapshot, today());

        assert_eq!(
            metrics.counts,
            CollectionCounts {
                assets: 3,
                licenses: 2,
                accessories: 1,
                consumables: 2,
                components: 2,
                users: 4,
            }
        );
        assert_eq!(metrics.value_by_kind.assets, 2000.0);
        assert_eq!(metrics.value_by_kind.licenses, 100.0);
        // Consumable costs are not part of the inventory value.
        assert_eq!(metrics.total_value, 2000.0 + 100.0 + 25.0 + 75.0);
        assert_eq!(metrics.expiring_warranties, 1);
        assert_eq!(metrics.expiring_licenses, 1);
        assert_eq!(metrics.expired_warranties, 1);
        assert_eq!(metrics.expired_licenses, 0);
        assert_eq!(metrics.low_stock_consumables, 1);
    }

    #[test]
    fn dashboard_is_deterministic() {
        let assets = vec![costed(Some(0.1)), costed(Some(0.2)), costed(Some(0.3))];
        let snapshot = InventorySnapshot::new().with_assets(&assets);
        let a = compute_dashboard_metrics(&snapshot, today());
        let b = compute_dashboard_metrics(&snapshot, today());
        assert_eq!(a, b);
    }

    // -- compliance -------------------------------------------------------

    #[test]
    fn compliance_rate_ignores_pending() {
        let summary = summarize_compliance(["passed", "passed", "passed", "failed", "pending"]);
        assert_eq!(summary.passed, 3);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.pending, 1);
        assert_eq!(summary.compliance_rate, 75.0);
    }

    #[test]
    fn compliance_rate_with_nothing_scored_is_zero() {
        let summary = summarize_compliance(["pending"]);
        assert_eq!(summary.compliance_rate, 0.0);
    }
}
