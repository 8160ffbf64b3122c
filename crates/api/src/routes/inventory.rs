//! Route definitions for the inventory tables.
//!
//! Every router exposes the same shape:
//!
//! ```text
//! GET    /      -> list
//! POST   /      -> create
//! GET    /{id}  -> get_by_id
//! PUT    /{id}  -> update
//! DELETE /{id}  -> delete
//! ```
//!
//! plus the extras noted on each function.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{
    accessories, assets, components, consumables, kits, licenses, people, requestable_items,
};
use crate::state::AppState;

/// Routes mounted at `/assets`.
pub fn assets_router() -> Router<AppState> {
    Router::new()
        .route("/", get(assets::list).post(assets::create))
        .route(
            "/{id}",
            get(assets::get_by_id)
                .put(assets::update)
                .delete(assets::delete),
        )
}

/// Routes mounted at `/licenses`.
///
/// ```text
/// POST /{id}/checkout  -> checkout
/// POST /{id}/checkin   -> checkin
/// ```
pub fn licenses_router() -> Router<AppState> {
    Router::new()
        .route("/", get(licenses::list).post(licenses::create))
        .route(
            "/{id}",
            get(licenses::get_by_id)
                .put(licenses::update)
                .delete(licenses::delete),
        )
        .route("/{id}/checkout", post(licenses::checkout))
        .route("/{id}/checkin", post(licenses::checkin))
}

/// Routes mounted at `/accessories`.
pub fn accessories_router() -> Router<AppState> {
    Router::new()
        .route("/", get(accessories::list).post(accessories::create))
        .route(
            "/{id}",
            get(accessories::get_by_id)
                .put(accessories::update)
                .delete(accessories::delete),
        )
}

/// Routes mounted at `/consumables`.
pub fn consumables_router() -> Router<AppState> {
    Router::new()
        .route("/", get(consumables::list).post(consumables::create))
        .route(
            "/{id}",
            get(consumables::get_by_id)
                .put(consumables::update)
                .delete(consumables::delete),
        )
}

/// Routes mounted at `/components`.
pub fn components_router() -> Router<AppState> {
    Router::new()
        .route("/", get(components::list).post(components::create))
        .route(
            "/{id}",
            get(components::get_by_id)
                .put(components::update)
                .delete(components::delete),
        )
}

/// Routes mounted at `/people`.
///
/// ```text
/// GET /{id}/holdings  -> holdings
/// ```
pub fn people_router() -> Router<AppState> {
    Router::new()
        .route("/", get(people::list).post(people::create))
        .route(
            "/{id}",
            get(people::get_by_id)
                .put(people::update)
                .delete(people::delete),
        )
        .route("/{id}/holdings", get(people::holdings))
}

/// Routes mounted at `/kits`.
pub fn kits_router() -> Router<AppState> {
    Router::new()
        .route("/", get(kits::list).post(kits::create))
        .route(
            "/{id}",
            get(kits::get_by_id).put(kits::update).delete(kits::delete),
        )
}

/// Routes mounted at `/requestable-items`.
pub fn requestable_items_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(requestable_items::list).post(requestable_items::create),
        )
        .route(
            "/{id}",
            get(requestable_items::get_by_id)
                .put(requestable_items::update)
                .delete(requestable_items::delete),
        )
}
