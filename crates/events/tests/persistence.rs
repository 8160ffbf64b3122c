use assetrack_db::models::change_log::ChangeLogParams;
use assetrack_db::repositories::ChangeLogRepo;
use assetrack_events::{ChangeAction, ChangeEvent, ChangePersistence, EventBus};
use sqlx::PgPool;

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_persist_writes_change_log_row(pool: PgPool) {
    let event = ChangeEvent::new("assets", ChangeAction::Insert, 11)
        .with_record(serde_json::json!({"id": 11, "name": "XPS"}));

    let entry = ChangePersistence::persist(&pool, &event).await.unwrap();
    assert_eq!(entry.table_name, "assets");
    assert_eq!(entry.action, "insert");
    assert_eq!(entry.record_id, 11);
    assert_eq!(entry.payload["name"], "XPS");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_run_drains_bus_until_closed(pool: PgPool) {
    let bus = EventBus::default();
    let handle = tokio::spawn(ChangePersistence::run(pool.clone(), bus.subscribe()));

    bus.publish(ChangeEvent::new("licenses", ChangeAction::Update, 1));
    bus.publish(ChangeEvent::new("licenses", ChangeAction::Delete, 1));
    drop(bus);
    handle.await.unwrap();

    let params = ChangeLogParams {
        table_name: Some("licenses".to_string()),
        ..Default::default()
    };
    let rows = ChangeLogRepo::list(&pool, &params).await.unwrap();
    assert_eq!(rows.len(), 2);
}
