//! Repository tests for alerts, compliance, integrations, reports and auth tables.

use assetrack_db::models::alert::{AlertListParams, CreateAlert, ALERT_WARRANTY_EXPIRING};
use assetrack_db::models::change_log::ChangeLogParams;
use assetrack_db::models::compliance::{CreateComplianceCheck, UpdateComplianceCheck};
use assetrack_db::models::integration::CreateIntegration;
use assetrack_db::models::report::CreateReport;
use assetrack_db::models::session::CreateSession;
use assetrack_db::models::user::CreateUser;
use assetrack_db::repositories::{
    AlertRepo, ChangeLogRepo, ComplianceCheckRepo, IntegrationRepo, ReportRepo, SessionRepo,
    UserRepo,
};
use chrono::{Duration, Utc};
use sqlx::PgPool;

fn warranty_alert(entity_id: i64) -> CreateAlert {
    CreateAlert {
        alert_type: ALERT_WARRANTY_EXPIRING.to_string(),
        severity: None,
        title: "Warranty expiring".to_string(),
        message: None,
        entity_type: Some("asset".to_string()),
        entity_id: Some(entity_id),
    }
}

// ---------------------------------------------------------------------------
// Alerts
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_if_absent_dedupes_open_alerts(pool: PgPool) {
    let first = AlertRepo::create_if_absent(&pool, &warranty_alert(7))
        .await
        .unwrap();
    assert!(first.is_some());
    assert_eq!(first.as_ref().map(|a| a.severity.as_str()), Some("medium"));

    let second = AlertRepo::create_if_absent(&pool, &warranty_alert(7))
        .await
        .unwrap();
    assert!(second.is_none());
    assert_eq!(AlertRepo::count_open(&pool).await.unwrap(), 1);

    // Once resolved, the same condition may raise a fresh alert.
    let id = first.unwrap().id;
    let resolved = AlertRepo::resolve(&pool, id).await.unwrap().unwrap();
    assert!(resolved.is_resolved);
    assert!(resolved.resolved_at.is_some());
    assert!(AlertRepo::create_if_absent(&pool, &warranty_alert(7))
        .await
        .unwrap()
        .is_some());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_resolved_alerts_hidden_by_default(pool: PgPool) {
    let alert = AlertRepo::create(&pool, &warranty_alert(1)).await.unwrap();
    AlertRepo::create(&pool, &warranty_alert(2)).await.unwrap();
    AlertRepo::resolve(&pool, alert.id).await.unwrap();

    let open = AlertRepo::list(&pool, &AlertListParams::default()).await.unwrap();
    assert_eq!(open.len(), 1);

    let params = AlertListParams {
        include_resolved: true,
        ..Default::default()
    };
    assert_eq!(AlertRepo::list(&pool, &params).await.unwrap().len(), 2);
}

// ---------------------------------------------------------------------------
// Compliance
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_compliance_status_change_stamps_last_checked(pool: PgPool) {
    let input = CreateComplianceCheck {
        name: "Disk encryption".to_string(),
        category: None,
        status: None,
        entity_type: None,
        entity_id: None,
        notes: None,
    };
    let check = ComplianceCheckRepo::create(&pool, &input).await.unwrap();
    assert_eq!(check.status, "pending");
    assert!(check.last_checked_at.is_none());

    let renamed = UpdateComplianceCheck {
        name: Some("Full disk encryption".to_string()),
        ..Default::default()
    };
    let check = ComplianceCheckRepo::update(&pool, check.id, &renamed)
        .await
        .unwrap()
        .unwrap();
    assert!(check.last_checked_at.is_none());

    let passed = UpdateComplianceCheck {
        status: Some("passed".to_string()),
        ..Default::default()
    };
    let check = ComplianceCheckRepo::update(&pool, check.id, &passed)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(check.status, "passed");
    assert!(check.last_checked_at.is_some());

    let statuses = ComplianceCheckRepo::list_statuses(&pool).await.unwrap();
    assert_eq!(statuses, vec!["passed".to_string()]);
}

// ---------------------------------------------------------------------------
// Integrations and reports
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_integration_defaults_and_sync_stamp(pool: PgPool) {
    let input = CreateIntegration {
        name: "HR feed".to_string(),
        provider: "csv".to_string(),
        status: None,
        base_url: None,
        field_mappings: None,
    };
    let integration = IntegrationRepo::create(&pool, &input).await.unwrap();
    assert_eq!(integration.status, "inactive");
    assert_eq!(integration.field_mappings, serde_json::json!({}));
    assert!(integration.last_sync_at.is_none());

    let synced = IntegrationRepo::touch_last_sync(&pool, integration.id)
        .await
        .unwrap()
        .unwrap();
    assert!(synced.last_sync_at.is_some());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_report_mark_generated(pool: PgPool) {
    let input = CreateReport {
        name: "Quarterly".to_string(),
        report_type: "financial".to_string(),
        parameters: None,
    };
    let report = ReportRepo::create(&pool, &input).await.unwrap();
    assert!(report.last_generated_at.is_none());

    let report = ReportRepo::mark_generated(&pool, report.id)
        .await
        .unwrap()
        .unwrap();
    assert!(report.last_generated_at.is_some());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_report_type_check_constraint(pool: PgPool) {
    let input = CreateReport {
        name: "Bad".to_string(),
        report_type: "weather".to_string(),
        parameters: None,
    };
    assert!(ReportRepo::create(&pool, &input).await.is_err());
}

// ---------------------------------------------------------------------------
// Users, sessions, change log
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_session_lookup_and_revoke(pool: PgPool) {
    let user = UserRepo::create(
        &pool,
        &CreateUser {
            username: "admin".to_string(),
            email: "admin@example.com".to_string(),
            password_hash: "not-a-real-hash".to_string(),
            role: "admin".to_string(),
        },
    )
    .await
    .unwrap();

    let session = SessionRepo::create(
        &pool,
        &CreateSession {
            user_id: user.id,
            refresh_token_hash: "abc123".to_string(),
            expires_at: Utc::now() + Duration::days(7),
        },
    )
    .await
    .unwrap();

    let found = SessionRepo::find_active_by_hash(&pool, "abc123").await.unwrap();
    assert_eq!(found.map(|s| s.id), Some(session.id));

    assert!(SessionRepo::revoke(&pool, session.id).await.unwrap());
    assert!(SessionRepo::find_active_by_hash(&pool, "abc123")
        .await
        .unwrap()
        .is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_expired_session_not_found(pool: PgPool) {
    let user = UserRepo::create(
        &pool,
        &CreateUser {
            username: "viewer".to_string(),
            email: "viewer@example.com".to_string(),
            password_hash: "x".to_string(),
            role: "viewer".to_string(),
        },
    )
    .await
    .unwrap();
    SessionRepo::create(
        &pool,
        &CreateSession {
            user_id: user.id,
            refresh_token_hash: "old".to_string(),
            expires_at: Utc::now() - Duration::minutes(1),
        },
    )
    .await
    .unwrap();

    assert!(SessionRepo::find_active_by_hash(&pool, "old")
        .await
        .unwrap()
        .is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_change_log_filters_by_table(pool: PgPool) {
    let payload = serde_json::json!({"name": "XPS"});
    ChangeLogRepo::insert(&pool, "assets", "insert", 1, None, &payload)
        .await
        .unwrap();
    ChangeLogRepo::insert(&pool, "licenses", "delete", 2, None, &payload)
        .await
        .unwrap();

    let params = ChangeLogParams {
        table_name: Some("assets".to_string()),
        ..Default::default()
    };
    let rows = ChangeLogRepo::list(&pool, &params).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].action, "insert");
    assert_eq!(rows[0].payload, payload);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_change_log_rejects_unknown_action(pool: PgPool) {
    let payload = serde_json::json!({});
    assert!(ChangeLogRepo::insert(&pool, "assets", "upsert", 1, None, &payload)
        .await
        .is_err());
}
