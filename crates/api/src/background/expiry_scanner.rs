//! Periodic scan that raises alerts for expiring warranties, expiring
//! licenses and low consumable stock.
//!
//! Alerts are deduplicated per `(alert_type, entity)` while unresolved, so
//! repeated scans only insert what is new. Each inserted alert is published
//! on the event bus like any other `alerts` insert.

use std::sync::Arc;
use std::time::Duration;

use assetrack_core::change::{
    ChangeAction, ChangeEvent, TABLE_ALERTS, TABLE_ASSETS, TABLE_CONSUMABLES, TABLE_LICENSES,
};
use assetrack_core::inventory::{SEVERITY_HIGH, SEVERITY_MEDIUM};
use assetrack_core::metrics::EXPIRING_WINDOW_DAYS;
use assetrack_core::types::Date;
use assetrack_db::models::alert::{
    Alert, CreateAlert, ALERT_LICENSE_EXPIRING, ALERT_LOW_STOCK, ALERT_WARRANTY_EXPIRING,
};
use assetrack_db::repositories::{AlertRepo, AssetRepo, ConsumableRepo, LicenseRepo};
use assetrack_db::DbPool;
use assetrack_events::EventBus;
use chrono::Utc;
use tokio_util::sync::CancellationToken;

/// Run the scan loop until `cancel` fires. The first scan runs immediately.
pub async fn run(pool: DbPool, bus: Arc<EventBus>, interval: Duration, cancel: CancellationToken) {
    tracing::info!(interval_secs = interval.as_secs(), "Expiry scanner started");

    let mut ticker = tokio::time::interval(interval);
    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Expiry scanner stopping");
                break;
            }
            _ = ticker.tick() => {
                let today = Utc::now().date_naive();
                match scan_once(&pool, &bus, today).await {
                    Ok(0) => tracing::debug!("Expiry scan: nothing new"),
                    Ok(raised) => tracing::info!(raised, "Expiry scan: alerts raised"),
                    Err(e) => tracing::error!(error = %e, "Expiry scan failed"),
                }
            }
        }
    }
}

/// One pass over warranties, licenses and consumables as of `today`.
///
/// Returns the number of alerts inserted.
pub async fn scan_once(pool: &DbPool, bus: &EventBus, today: Date) -> Result<usize, sqlx::Error> {
    let horizon = today + chrono::Duration::days(EXPIRING_WINDOW_DAYS);
    let mut raised = 0;

    for asset in AssetRepo::list_warranty_expiring(pool, today, horizon).await? {
        let Some(expiry) = asset.warranty_expiry else {
            continue;
        };
        let input = CreateAlert {
            alert_type: ALERT_WARRANTY_EXPIRING.to_string(),
            severity: Some(severity_for(expiry, today).to_string()),
            title: format!("Warranty expiring: {}", asset.name),
            message: Some(format!(
                "Warranty for asset {} ends on {expiry}",
                asset.asset_tag
            )),
            entity_type: Some(TABLE_ASSETS.to_string()),
            entity_id: Some(asset.id),
        };
        raised += raise(pool, bus, &input).await?;
    }

    for license in LicenseRepo::list_expiring(pool, today, horizon).await? {
        let Some(expiry) = license.expiration_date else {
            continue;
        };
        let input = CreateAlert {
            alert_type: ALERT_LICENSE_EXPIRING.to_string(),
            severity: Some(severity_for(expiry, today).to_string()),
            title: format!("License expiring: {}", license.name),
            message: Some(format!("License expires on {expiry}")),
            entity_type: Some(TABLE_LICENSES.to_string()),
            entity_id: Some(license.id),
        };
        raised += raise(pool, bus, &input).await?;
    }

    for consumable in ConsumableRepo::list_low_stock(pool).await? {
        let input = CreateAlert {
            alert_type: ALERT_LOW_STOCK.to_string(),
            severity: Some(stock_severity(consumable.quantity).to_string()),
            title: format!("Low stock: {}", consumable.name),
            message: Some(format!(
                "{} on hand, reorder threshold {}",
                consumable.quantity, consumable.min_quantity
            )),
            entity_type: Some(TABLE_CONSUMABLES.to_string()),
            entity_id: Some(consumable.id),
        };
        raised += raise(pool, bus, &input).await?;
    }

    Ok(raised)
}

async fn raise(pool: &DbPool, bus: &EventBus, input: &CreateAlert) -> Result<usize, sqlx::Error> {
    match AlertRepo::create_if_absent(pool, input).await? {
        Some(alert) => {
            publish_alert(bus, &alert);
            Ok(1)
        }
        None => Ok(0),
    }
}

fn publish_alert(bus: &EventBus, alert: &Alert) {
    let mut event = ChangeEvent::new(TABLE_ALERTS, ChangeAction::Insert, alert.id);
    if let Ok(value) = serde_json::to_value(alert) {
        event = event.with_record(value);
    }
    bus.publish(event);
}

/// `high` within a week of expiry, `medium` otherwise.
fn severity_for(expiry: Date, today: Date) -> &'static str {
    if (expiry - today).num_days() <= 7 {
        SEVERITY_HIGH
    } else {
        SEVERITY_MEDIUM
    }
}

/// `high` once stock is gone, `medium` while some remains.
fn stock_severity(quantity: i32) -> &'static str {
    if quantity == 0 {
        SEVERITY_HIGH
    } else {
        SEVERITY_MEDIUM
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn today() -> Date {
        NaiveDate::from_ymd_opt(2026, 3, 1).unwrap()
    }

    fn days_ahead(n: i64) -> Date {
        today() + chrono::Duration::days(n)
    }

    #[test]
    fn severity_is_high_inside_a_week() {
        assert_eq!(severity_for(today(), today()), SEVERITY_HIGH);
        assert_eq!(severity_for(days_ahead(7), today()), SEVERITY_HIGH);
    }

    #[test]
    fn severity_is_medium_further_out() {
        assert_eq!(severity_for(days_ahead(8), today()), SEVERITY_MEDIUM);
        assert_eq!(severity_for(days_ahead(30), today()), SEVERITY_MEDIUM);
    }

    #[test]
    fn empty_stock_is_high_severity() {
        assert_eq!(stock_severity(0), SEVERITY_HIGH);
        assert_eq!(stock_severity(1), SEVERITY_MEDIUM);
    }
}
