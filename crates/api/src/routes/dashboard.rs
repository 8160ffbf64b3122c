//! Route definitions for `/dashboard`.

use axum::routing::get;
use axum::Router;

use crate::handlers::dashboard;
use crate::state::AppState;

/// Routes mounted at `/dashboard`.
///
/// ```text
/// GET /metrics       -> metrics
/// GET /utilization   -> utilization
/// GET /breakdown     -> breakdown (?field=)
/// GET /financials    -> financials
/// GET /compliance    -> compliance
/// GET /maintenance   -> maintenance
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/metrics", get(dashboard::metrics))
        .route("/utilization", get(dashboard::utilization))
        .route("/breakdown", get(dashboard::breakdown))
        .route("/financials", get(dashboard::financials))
        .route("/compliance", get(dashboard::compliance))
        .route("/maintenance", get(dashboard::maintenance))
}
