//! Repository tests for the inventory tables against a real database.

use assetrack_core::metrics::{compute_dashboard_metrics, InventorySnapshot};
use assetrack_core::search::filter_by_search;
use assetrack_db::models::accessory::CreateAccessory;
use assetrack_db::models::asset::{AssetListParams, CreateAsset, UpdateAsset};
use assetrack_db::models::consumable::{ConsumableListParams, CreateConsumable};
use assetrack_db::models::kit::{CreateKit, KitItem, UpdateKit};
use assetrack_db::models::license::{CreateLicense, LicenseListParams};
use assetrack_db::models::person::{CreatePerson, PersonListParams, UpdatePerson};
use assetrack_db::repositories::{
    AccessoryRepo, AssetRepo, ConsumableRepo, KitRepo, LicenseRepo, PersonRepo,
};
use chrono::{Duration, Utc};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_asset(name: &str, tag: &str) -> CreateAsset {
    CreateAsset {
        name: name.to_string(),
        asset_tag: tag.to_string(),
        serial: None,
        model: None,
        category: Some("Laptop".to_string()),
        manufacturer: Some("Dell".to_string()),
        status: None,
        location: None,
        assigned_to: None,
        purchase_date: None,
        purchase_cost: Some(1200.0),
        warranty_expiry: None,
        notes: None,
    }
}

fn new_license(name: &str, seats: i32) -> CreateLicense {
    CreateLicense {
        name: name.to_string(),
        product_key: None,
        manufacturer: Some("Adobe".to_string()),
        category: None,
        seats,
        available_seats: None,
        purchase_cost: Some(300.0),
        purchase_date: None,
        expiration_date: None,
        assigned_to: None,
        notes: None,
    }
}

fn new_person(name: &str, email: &str) -> CreatePerson {
    CreatePerson {
        name: name.to_string(),
        email: email.to_string(),
        department: Some("Engineering".to_string()),
        title: None,
        location: None,
        employee_number: None,
    }
}

fn is_unique_violation(err: &sqlx::Error, constraint: &str) -> bool {
    match err {
        sqlx::Error::Database(db) => {
            db.code().as_deref() == Some("23505") && db.constraint() == Some(constraint)
        }
        _ => false,
    }
}

// ---------------------------------------------------------------------------
// Assets
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_asset_create_defaults_status(pool: PgPool) {
    let asset = AssetRepo::create(&pool, &new_asset("XPS 13", "AT-001"))
        .await
        .unwrap();
    assert_eq!(asset.status, "ready_to_deploy");
    assert_eq!(asset.purchase_cost, Some(1200.0));

    let found = AssetRepo::find_by_id(&pool, asset.id).await.unwrap();
    assert_eq!(found.map(|a| a.asset_tag), Some("AT-001".to_string()));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_asset_tag_is_unique(pool: PgPool) {
    AssetRepo::create(&pool, &new_asset("A", "DUP-1")).await.unwrap();
    let err = AssetRepo::create(&pool, &new_asset("B", "DUP-1"))
        .await
        .unwrap_err();
    assert!(is_unique_violation(&err, "uq_assets_asset_tag"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_asset_status_check_constraint(pool: PgPool) {
    let mut input = new_asset("A", "AT-CK");
    input.status = Some("borrowed".to_string());
    assert!(AssetRepo::create(&pool, &input).await.is_err());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_asset_update_keeps_unset_fields(pool: PgPool) {
    let asset = AssetRepo::create(&pool, &new_asset("Old", "AT-UP")).await.unwrap();
    let update = UpdateAsset {
        name: Some("New".to_string()),
        status: Some("deployed".to_string()),
        ..Default::default()
    };
    let updated = AssetRepo::update(&pool, asset.id, &update)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.name, "New");
    assert_eq!(updated.status, "deployed");
    assert_eq!(updated.manufacturer.as_deref(), Some("Dell"));
    assert!(updated.updated_at >= asset.updated_at);

    assert!(AssetRepo::update(&pool, 999_999, &update).await.unwrap().is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_asset_search_is_case_insensitive(pool: PgPool) {
    AssetRepo::create(&pool, &new_asset("ThinkPad X1", "AT-S1")).await.unwrap();
    let mut other = new_asset("Monitor", "AT-S2");
    other.manufacturer = Some("LG".to_string());
    other.category = Some("Display".to_string());
    AssetRepo::create(&pool, &other).await.unwrap();

    let params = AssetListParams {
        search: Some("thinkpad".to_string()),
        ..Default::default()
    };
    let rows = AssetRepo::list(&pool, &params).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].asset_tag, "AT-S1");

    // Matches on manufacturer as well as name.
    let params = AssetListParams {
        search: Some("dELL".to_string()),
        ..Default::default()
    };
    assert_eq!(AssetRepo::list(&pool, &params).await.unwrap().len(), 1);

    // Blank search lists everything.
    let params = AssetListParams {
        search: Some("  ".to_string()),
        ..Default::default()
    };
    assert_eq!(AssetRepo::list(&pool, &params).await.unwrap().len(), 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_in_memory_search_agrees_with_sql(pool: PgPool) {
    AssetRepo::create(&pool, &new_asset("ThinkPad X1", "AT-M1")).await.unwrap();
    let mut monitor = new_asset("U2720Q", "AT-M2");
    monitor.manufacturer = Some("LG".to_string());
    monitor.serial = Some("SN-LG-77".to_string());
    AssetRepo::create(&pool, &monitor).await.unwrap();
    PersonRepo::create(&pool, &new_person("Ada", "ada@example.com"))
        .await
        .unwrap();

    let assets = AssetRepo::list(&pool, &AssetListParams::default()).await.unwrap();
    for term in ["dell", "LG", "sn-lg", "at-m", "printer"] {
        let params = AssetListParams {
            search: Some(term.to_string()),
            ..Default::default()
        };
        let mut sql: Vec<_> = AssetRepo::list(&pool, &params)
            .await
            .unwrap()
            .into_iter()
            .map(|a| a.id)
            .collect();
        let mut local: Vec<_> = filter_by_search(&assets, term).iter().map(|a| a.id).collect();
        sql.sort_unstable();
        local.sort_unstable();
        assert_eq!(local, sql, "term {term}");
    }

    let people = PersonRepo::list(&pool, &PersonListParams::default()).await.unwrap();
    assert_eq!(filter_by_search(&people, "EXAMPLE.com").len(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_asset_delete(pool: PgPool) {
    let asset = AssetRepo::create(&pool, &new_asset("Gone", "AT-DEL")).await.unwrap();
    assert!(AssetRepo::delete(&pool, asset.id).await.unwrap());
    assert!(!AssetRepo::delete(&pool, asset.id).await.unwrap());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_warranty_expiring_window(pool: PgPool) {
    let today = Utc::now().date_naive();
    let mut soon = new_asset("Soon", "AT-W1");
    soon.warranty_expiry = Some(today + Duration::days(10));
    let mut later = new_asset("Later", "AT-W2");
    later.warranty_expiry = Some(today + Duration::days(40));
    AssetRepo::create(&pool, &soon).await.unwrap();
    AssetRepo::create(&pool, &later).await.unwrap();

    let rows = AssetRepo::list_warranty_expiring(&pool, today, today + Duration::days(30))
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].asset_tag, "AT-W1");
}

// ---------------------------------------------------------------------------
// Licenses
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_license_available_defaults_to_seats(pool: PgPool) {
    let license = LicenseRepo::create(&pool, &new_license("Photoshop", 5)).await.unwrap();
    assert_eq!(license.seats, 5);
    assert_eq!(license.available_seats, 5);
    assert_eq!(license.used_seats(), 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_license_checkout_stops_at_zero(pool: PgPool) {
    let license = LicenseRepo::create(&pool, &new_license("Acrobat", 1)).await.unwrap();

    let taken = LicenseRepo::checkout_seat(&pool, license.id).await.unwrap().unwrap();
    assert_eq!(taken.available_seats, 0);
    assert!(LicenseRepo::checkout_seat(&pool, license.id).await.unwrap().is_none());

    let back = LicenseRepo::checkin_seat(&pool, license.id).await.unwrap().unwrap();
    assert_eq!(back.available_seats, 1);
    assert!(LicenseRepo::checkin_seat(&pool, license.id).await.unwrap().is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_license_seat_constraint(pool: PgPool) {
    let mut input = new_license("Bad", 2);
    input.available_seats = Some(3);
    assert!(LicenseRepo::create(&pool, &input).await.is_err());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_license_available_only_filter(pool: PgPool) {
    let full = LicenseRepo::create(&pool, &new_license("Full", 1)).await.unwrap();
    LicenseRepo::create(&pool, &new_license("Free", 3)).await.unwrap();
    LicenseRepo::checkout_seat(&pool, full.id).await.unwrap();

    let params = LicenseListParams {
        available_only: true,
        ..Default::default()
    };
    let rows = LicenseRepo::list(&pool, &params).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].name, "Free");
}

// ---------------------------------------------------------------------------
// Stock
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_consumable_low_stock(pool: PgPool) {
    let toner = CreateConsumable {
        name: "Toner".to_string(),
        category: None,
        manufacturer: None,
        quantity: 2,
        min_quantity: Some(5),
        unit_cost: Some(40.0),
        location: None,
    };
    let paper = CreateConsumable {
        name: "Paper".to_string(),
        quantity: 100,
        min_quantity: Some(10),
        ..toner.clone()
    };
    ConsumableRepo::create(&pool, &toner).await.unwrap();
    ConsumableRepo::create(&pool, &paper).await.unwrap();

    let low = ConsumableRepo::list_low_stock(&pool).await.unwrap();
    assert_eq!(low.len(), 1);
    assert_eq!(low[0].name, "Toner");

    let params = ConsumableListParams {
        low_stock: true,
        ..Default::default()
    };
    assert_eq!(ConsumableRepo::list(&pool, &params).await.unwrap().len(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_accessory_available_defaults_to_quantity(pool: PgPool) {
    let input = CreateAccessory {
        name: "USB-C dock".to_string(),
        category: None,
        manufacturer: None,
        model: None,
        quantity: 8,
        available_quantity: None,
        purchase_cost: None,
        location: None,
    };
    let accessory = AccessoryRepo::create(&pool, &input).await.unwrap();
    assert_eq!(accessory.available_quantity, 8);
}

// ---------------------------------------------------------------------------
// People and kits
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_person_holdings_and_unassign_on_delete(pool: PgPool) {
    let person = PersonRepo::create(&pool, &new_person("Ada", "ada@example.com"))
        .await
        .unwrap();
    let mut input = new_asset("Laptop", "AT-P1");
    input.assigned_to = Some(person.id);
    let asset = AssetRepo::create(&pool, &input).await.unwrap();

    let held = AssetRepo::list_for_person(&pool, person.id).await.unwrap();
    assert_eq!(held.len(), 1);

    assert!(PersonRepo::delete(&pool, person.id).await.unwrap());
    let asset = AssetRepo::find_by_id(&pool, asset.id).await.unwrap().unwrap();
    assert_eq!(asset.assigned_to, None);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_inactive_people_hidden_by_default(pool: PgPool) {
    let person = PersonRepo::create(&pool, &new_person("Bob", "bob@example.com"))
        .await
        .unwrap();
    PersonRepo::create(&pool, &new_person("Cy", "cy@example.com"))
        .await
        .unwrap();
    let deactivate = UpdatePerson {
        is_active: Some(false),
        ..Default::default()
    };
    PersonRepo::update(&pool, person.id, &deactivate).await.unwrap();

    let active = PersonRepo::list(&pool, &PersonListParams::default()).await.unwrap();
    assert_eq!(active.len(), 1);
    assert_eq!(PersonRepo::count(&pool).await.unwrap(), 2);

    let params = PersonListParams {
        include_inactive: true,
        ..Default::default()
    };
    assert_eq!(PersonRepo::list(&pool, &params).await.unwrap().len(), 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_person_email_unique(pool: PgPool) {
    PersonRepo::create(&pool, &new_person("A", "same@example.com")).await.unwrap();
    let err = PersonRepo::create(&pool, &new_person("B", "same@example.com"))
        .await
        .unwrap_err();
    assert!(is_unique_violation(&err, "uq_people_email"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_kit_items_round_trip_through_jsonb(pool: PgPool) {
    let input = CreateKit {
        name: "Onboarding".to_string(),
        description: None,
        items: vec![KitItem {
            item_type: "asset".to_string(),
            item_id: 1,
            quantity: 1,
        }],
    };
    let kit = KitRepo::create(&pool, &input).await.unwrap();
    assert_eq!(kit.items.0, input.items);

    let update = UpdateKit {
        items: Some(vec![]),
        ..Default::default()
    };
    let kit = KitRepo::update(&pool, kit.id, &update).await.unwrap().unwrap();
    assert!(kit.items.0.is_empty());
    assert_eq!(kit.name, "Onboarding");
}

// ---------------------------------------------------------------------------
// Aggregation over stored rows
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_dashboard_metrics_from_stored_rows(pool: PgPool) {
    let today = Utc::now().date_naive();
    let mut a = new_asset("A", "AT-M1");
    a.purchase_cost = Some(10.0);
    a.warranty_expiry = Some(today + Duration::days(10));
    let mut b = new_asset("B", "AT-M2");
    b.purchase_cost = None;
    let mut c = new_asset("C", "AT-M3");
    c.purchase_cost = Some(5.0);
    for input in [&a, &b, &c] {
        AssetRepo::create(&pool, input).await.unwrap();
    }

    let assets = AssetRepo::list_all(&pool).await.unwrap();
    let snapshot = InventorySnapshot::new().with_assets(&assets);
    let metrics = compute_dashboard_metrics(&snapshot, today);
    assert_eq!(metrics.counts.assets, 3);
    assert_eq!(metrics.total_value, 15.0);
    assert_eq!(metrics.expiring_warranties, 1);
}
