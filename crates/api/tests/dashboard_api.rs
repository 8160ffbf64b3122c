//! Dashboard aggregates computed over seeded rows.

mod common;

use axum::http::StatusCode;
use chrono::Utc;
use common::{admin_token, body_json, get_auth, post_json_auth, put_json_auth, viewer_token};
use serde_json::{json, Value};
use sqlx::PgPool;

async fn seed(pool: &PgPool, uri: &str, body: Value) {
    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(app, uri, body, &admin_token()).await;
    assert_eq!(response.status(), StatusCode::CREATED, "seed {uri}");
}

async fn dashboard(pool: &PgPool, path: &str) -> Value {
    let app = common::build_test_app(pool.clone());
    let response = get_auth(app, &format!("/api/v1/dashboard/{path}"), &viewer_token()).await;
    assert_eq!(response.status(), StatusCode::OK, "dashboard {path}");
    body_json(response).await["data"].clone()
}

fn days_from_today(days: i64) -> String {
    (Utc::now().date_naive() + chrono::Duration::days(days)).to_string()
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_metrics_on_empty_inventory(pool: PgPool) {
    let data = dashboard(&pool, "metrics").await;
    assert_eq!(data["counts"]["assets"], 0);
    assert_eq!(data["total_value"], 0.0);
    assert_eq!(data["expiring_warranties"], 0);
    assert_eq!(data["window_days"], 30);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_metrics_totals_and_expiry_window(pool: PgPool) {
    seed(
        &pool,
        "/api/v1/assets",
        json!({
            "name": "A",
            "asset_tag": "A-1",
            "purchase_cost": 10.0,
            "warranty_expiry": days_from_today(10),
        }),
    )
    .await;
    seed(
        &pool,
        "/api/v1/assets",
        json!({"name": "B", "asset_tag": "A-2", "warranty_expiry": days_from_today(40)}),
    )
    .await;
    seed(
        &pool,
        "/api/v1/assets",
        json!({
            "name": "C",
            "asset_tag": "A-3",
            "purchase_cost": 5.0,
            "warranty_expiry": days_from_today(-3),
        }),
    )
    .await;
    seed(
        &pool,
        "/api/v1/licenses",
        json!({
            "name": "L",
            "seats": 4,
            "purchase_cost": 100.0,
            "expiration_date": days_from_today(0),
        }),
    )
    .await;

    let data = dashboard(&pool, "metrics").await;
    assert_eq!(data["counts"]["assets"], 3);
    assert_eq!(data["counts"]["licenses"], 1);
    assert_eq!(data["value_by_kind"]["assets"], 15.0);
    assert_eq!(data["total_value"], 115.0);
    assert_eq!(data["expiring_warranties"], 1);
    assert_eq!(data["expired_warranties"], 1);
    assert_eq!(data["expiring_licenses"], 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_metrics_counts_inactive_people(pool: PgPool) {
    seed(&pool, "/api/v1/people", json!({"name": "Ada", "email": "ada@example.com"})).await;

    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        "/api/v1/people",
        json!({"name": "Bob", "email": "bob@example.com"}),
        &admin_token(),
    )
    .await;
    let bob_id = body_json(response).await["data"]["id"].as_i64().unwrap();

    let app = common::build_test_app(pool.clone());
    let response = put_json_auth(
        app,
        &format!("/api/v1/people/{bob_id}"),
        json!({"is_active": false}),
        &admin_token(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let data = dashboard(&pool, "metrics").await;
    assert_eq!(data["counts"]["users"], 2);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_utilization(pool: PgPool) {
    seed(&pool, "/api/v1/licenses", json!({"name": "L", "seats": 4, "available_seats": 1})).await;
    seed(
        &pool,
        "/api/v1/assets",
        json!({"name": "A", "asset_tag": "U-1", "status": "deployed"}),
    )
    .await;
    seed(&pool, "/api/v1/assets", json!({"name": "B", "asset_tag": "U-2"})).await;

    let data = dashboard(&pool, "utilization").await;
    assert_eq!(data["license_seats"], 75.0);
    assert_eq!(data["assets_deployed"], 50.0);
    assert_eq!(data["accessories"], 0.0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_breakdown_by_category_skips_missing(pool: PgPool) {
    seed(
        &pool,
        "/api/v1/assets",
        json!({"name": "A", "asset_tag": "B-1", "category": "Laptop"}),
    )
    .await;
    seed(
        &pool,
        "/api/v1/assets",
        json!({"name": "B", "asset_tag": "B-2", "category": "Laptop"}),
    )
    .await;
    seed(&pool, "/api/v1/assets", json!({"name": "C", "asset_tag": "B-3"})).await;

    let data = dashboard(&pool, "breakdown?field=category").await;
    assert_eq!(data, json!({"Laptop": 2}));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_financials(pool: PgPool) {
    seed(
        &pool,
        "/api/v1/assets",
        json!({"name": "A", "asset_tag": "F-1", "category": "Server", "purchase_cost": 900.0}),
    )
    .await;
    seed(
        &pool,
        "/api/v1/consumables",
        json!({"name": "Toner", "quantity": 4, "unit_cost": 25.0}),
    )
    .await;

    let data = dashboard(&pool, "financials").await;
    assert_eq!(data["total_value"], 900.0);
    assert_eq!(data["asset_value_by_category"]["Server"], 900.0);
    assert_eq!(data["consumable_stock_value"], 100.0);
    assert_eq!(data["maintenance_cost"], 0.0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_compliance_overview(pool: PgPool) {
    seed(
        &pool,
        "/api/v1/compliance-checks",
        json!({"name": "Disk encryption", "status": "passed"}),
    )
    .await;
    seed(
        &pool,
        "/api/v1/compliance-checks",
        json!({"name": "AV installed", "status": "failed"}),
    )
    .await;
    seed(&pool, "/api/v1/compliance-checks", json!({"name": "Patch level"})).await;
    seed(
        &pool,
        "/api/v1/policy-violations",
        json!({"policy": "USB storage", "severity": "high"}),
    )
    .await;

    let data = dashboard(&pool, "compliance").await;
    assert_eq!(data["checks"]["passed"], 1);
    assert_eq!(data["checks"]["failed"], 1);
    assert_eq!(data["checks"]["pending"], 1);
    assert_eq!(data["checks"]["compliance_rate"], 50.0);
    assert_eq!(data["open_violations"], 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_maintenance_overview(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let response = post_json_auth(
        app,
        "/api/v1/assets",
        json!({"name": "Printer", "asset_tag": "M-1"}),
        &admin_token(),
    )
    .await;
    let asset_id = body_json(response).await["data"]["id"].as_i64().unwrap();

    seed(
        &pool,
        "/api/v1/maintenance",
        json!({
            "asset_id": asset_id,
            "maintenance_type": "repair",
            "title": "Roller",
            "cost": 40.0,
        }),
    )
    .await;
    seed(
        &pool,
        "/api/v1/maintenance",
        json!({
            "asset_id": asset_id,
            "maintenance_type": "inspection",
            "title": "Yearly",
            "status": "completed",
            "cost": 60.0,
        }),
    )
    .await;

    let data = dashboard(&pool, "maintenance").await;
    assert_eq!(data["total_records"], 2);
    assert_eq!(data["open_records"], 1);
    assert_eq!(data["by_type"]["repair"], 1);
    assert_eq!(data["total_cost"], 100.0);
}
