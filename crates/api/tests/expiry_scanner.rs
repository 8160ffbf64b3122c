//! Expiry scanner against a real database.

use assetrack_api::background::expiry_scanner::scan_once;
use assetrack_core::change::{ChangeAction, TABLE_ALERTS, TABLE_ASSETS, TABLE_CONSUMABLES};
use assetrack_core::inventory::SEVERITY_HIGH;
use assetrack_db::models::alert::{AlertListParams, ALERT_LOW_STOCK, ALERT_WARRANTY_EXPIRING};
use assetrack_db::models::asset::CreateAsset;
use assetrack_db::models::consumable::CreateConsumable;
use assetrack_db::repositories::{AlertRepo, AssetRepo, ConsumableRepo};
use assetrack_events::EventBus;
use chrono::{Duration, NaiveDate};
use sqlx::PgPool;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 6, 1).unwrap()
}

fn asset(tag: &str, warranty_in_days: i64) -> CreateAsset {
    CreateAsset {
        name: format!("Asset {tag}"),
        asset_tag: tag.to_string(),
        serial: None,
        model: None,
        category: None,
        manufacturer: None,
        status: None,
        location: None,
        assigned_to: None,
        purchase_date: None,
        purchase_cost: None,
        warranty_expiry: Some(today() + Duration::days(warranty_in_days)),
        notes: None,
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_scan_raises_alerts_once(pool: PgPool) {
    let near = AssetRepo::create(&pool, &asset("NEAR", 5)).await.unwrap();
    AssetRepo::create(&pool, &asset("FAR", 45)).await.unwrap();
    let toner = ConsumableRepo::create(
        &pool,
        &CreateConsumable {
            name: "Toner".to_string(),
            category: None,
            manufacturer: None,
            quantity: 0,
            min_quantity: Some(2),
            unit_cost: None,
            location: None,
        },
    )
    .await
    .unwrap();

    let bus = EventBus::default();
    let mut rx = bus.subscribe();

    let raised = scan_once(&pool, &bus, today()).await.unwrap();
    assert_eq!(raised, 2);

    let alerts = AlertRepo::list(&pool, &AlertListParams::default()).await.unwrap();
    let warranty = alerts
        .iter()
        .find(|a| a.alert_type == ALERT_WARRANTY_EXPIRING)
        .expect("warranty alert");
    assert_eq!(warranty.entity_type.as_deref(), Some(TABLE_ASSETS));
    assert_eq!(warranty.entity_id, Some(near.id));
    assert_eq!(warranty.severity, SEVERITY_HIGH);
    let low_stock = alerts
        .iter()
        .find(|a| a.alert_type == ALERT_LOW_STOCK)
        .expect("low stock alert");
    assert_eq!(low_stock.entity_type.as_deref(), Some(TABLE_CONSUMABLES));
    assert_eq!(low_stock.entity_id, Some(toner.id));
    assert_eq!(low_stock.severity, SEVERITY_HIGH);

    let event = rx.recv().await.unwrap();
    assert_eq!(event.table, TABLE_ALERTS);
    assert_eq!(event.action, ChangeAction::Insert);
    assert_eq!(event.actor_user_id, None);

    // Open alerts are not duplicated by a second pass.
    assert_eq!(scan_once(&pool, &bus, today()).await.unwrap(), 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_resolved_alert_is_raised_again(pool: PgPool) {
    AssetRepo::create(&pool, &asset("AGAIN", 20)).await.unwrap();
    let bus = EventBus::default();

    assert_eq!(scan_once(&pool, &bus, today()).await.unwrap(), 1);
    let alerts = AlertRepo::list(&pool, &AlertListParams::default()).await.unwrap();
    AlertRepo::resolve(&pool, alerts[0].id).await.unwrap();

    assert_eq!(scan_once(&pool, &bus, today()).await.unwrap(), 1);
}
