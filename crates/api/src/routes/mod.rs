pub mod auth;
pub mod dashboard;
pub mod health;
pub mod inventory;
pub mod operations;

use axum::routing::get;
use axum::Router;

use crate::state::AppState;
use crate::ws;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /realtime?table=                 WebSocket change feed
///
/// /auth/login|refresh|logout|me    authentication
///
/// /assets  /licenses  /accessories  /consumables  /components
/// /people  /kits  /requestable-items                          inventory CRUD
///
/// /alerts  /compliance-checks  /policy-violations  /maintenance
/// /integrations  /imports  /reports                           operations CRUD
///
/// /dashboard/*                     aggregates
/// /changes                         change log (admin)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/realtime", get(ws::realtime_handler))
        .nest("/auth", auth::router())
        // Inventory.
        .nest("/assets", inventory::assets_router())
        .nest("/licenses", inventory::licenses_router())
        .nest("/accessories", inventory::accessories_router())
        .nest("/consumables", inventory::consumables_router())
        .nest("/components", inventory::components_router())
        .nest("/people", inventory::people_router())
        .nest("/kits", inventory::kits_router())
        .nest("/requestable-items", inventory::requestable_items_router())
        // Operations.
        .nest("/alerts", operations::alerts_router())
        .nest("/compliance-checks", operations::compliance_checks_router())
        .nest("/policy-violations", operations::policy_violations_router())
        .nest("/maintenance", operations::maintenance_router())
        .nest("/integrations", operations::integrations_router())
        .nest("/imports", operations::imports_router())
        .nest("/reports", operations::reports_router())
        .nest("/changes", operations::changes_router())
        // Aggregates.
        .nest("/dashboard", dashboard::router())
}
