//! Route definitions for alerts, compliance, maintenance, integrations,
//! imports, reports and the change log.
//!
//! CRUD routers follow the `GET|POST /`, `GET|PUT|DELETE /{id}` shape.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{
    alerts, changes, compliance, imports, integrations, maintenance, reports,
};
use crate::state::AppState;

/// Routes mounted at `/alerts`.
///
/// ```text
/// POST /{id}/resolve  -> resolve
/// ```
pub fn alerts_router() -> Router<AppState> {
    Router::new()
        .route("/", get(alerts::list).post(alerts::create))
        .route(
            "/{id}",
            get(alerts::get_by_id)
                .put(alerts::update)
                .delete(alerts::delete),
        )
        .route("/{id}/resolve", post(alerts::resolve))
}

/// Routes mounted at `/compliance-checks`.
pub fn compliance_checks_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(compliance::list_checks).post(compliance::create_check),
        )
        .route(
            "/{id}",
            get(compliance::get_check)
                .put(compliance::update_check)
                .delete(compliance::delete_check),
        )
}

/// Routes mounted at `/policy-violations`.
pub fn policy_violations_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(compliance::list_violations).post(compliance::create_violation),
        )
        .route(
            "/{id}",
            get(compliance::get_violation)
                .put(compliance::update_violation)
                .delete(compliance::delete_violation),
        )
}

/// Routes mounted at `/maintenance`.
pub fn maintenance_router() -> Router<AppState> {
    Router::new()
        .route("/", get(maintenance::list).post(maintenance::create))
        .route(
            "/{id}",
            get(maintenance::get_by_id)
                .put(maintenance::update)
                .delete(maintenance::delete),
        )
}

/// Routes mounted at `/integrations`.
///
/// ```text
/// POST /{id}/preview-mapping  -> preview_mapping
/// ```
pub fn integrations_router() -> Router<AppState> {
    Router::new()
        .route("/", get(integrations::list).post(integrations::create))
        .route(
            "/{id}",
            get(integrations::get_by_id)
                .put(integrations::update)
                .delete(integrations::delete),
        )
        .route("/{id}/preview-mapping", post(integrations::preview_mapping))
}

/// Routes mounted at `/imports`.
pub fn imports_router() -> Router<AppState> {
    Router::new()
        .route("/", get(imports::list).post(imports::create))
        .route(
            "/{id}",
            get(imports::get_by_id)
                .put(imports::update)
                .delete(imports::delete),
        )
}

/// Routes mounted at `/reports`.
///
/// ```text
/// POST /{id}/generate  -> generate
/// ```
pub fn reports_router() -> Router<AppState> {
    Router::new()
        .route("/", get(reports::list).post(reports::create))
        .route(
            "/{id}",
            get(reports::get_by_id)
                .put(reports::update)
                .delete(reports::delete),
        )
        .route("/{id}/generate", post(reports::generate))
}

/// Routes mounted at `/changes` (admin only).
pub fn changes_router() -> Router<AppState> {
    Router::new().route("/", get(changes::list))
}
