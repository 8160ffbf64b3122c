//! Handlers for the `/consumables` resource.

use assetrack_core::change::{ChangeAction, TABLE_CONSUMABLES};
use assetrack_core::inventory::validate_cost;
use assetrack_core::types::DbId;
use assetrack_db::models::consumable::{
    Consumable, ConsumableListParams, CreateConsumable, UpdateConsumable,
};
use assetrack_db::repositories::ConsumableRepo;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAuth, RequireWriter};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/consumables
///
/// `?low_stock=true` keeps rows at or below their reorder threshold.
pub async fn list(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Query(params): Query<ConsumableListParams>,
) -> AppResult<Json<DataResponse<Vec<Consumable>>>> {
    let rows = ConsumableRepo::list(&state.pool, &params).await?;
    Ok(Json(DataResponse::new(rows)))
}

/// POST /api/v1/consumables
pub async fn create(
    RequireWriter(user): RequireWriter,
    State(state): State<AppState>,
    Json(input): Json<CreateConsumable>,
) -> AppResult<(StatusCode, Json<DataResponse<Consumable>>)> {
    input.validate()?;
    validate_cost("unit_cost", input.unit_cost)?;

    let consumable = ConsumableRepo::create(&state.pool, &input).await?;
    tracing::info!(
        consumable_id = consumable.id,
        quantity = consumable.quantity,
        "Consumable created"
    );
    state.publish_change(
        TABLE_CONSUMABLES,
        ChangeAction::Insert,
        consumable.id,
        user.user_id,
        &consumable,
    );
    Ok((StatusCode::CREATED, Json(DataResponse::new(consumable))))
}

/// GET /api/v1/consumables/{id}
pub async fn get_by_id(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Consumable>>> {
    let consumable = ConsumableRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Consumable", id))?;
    Ok(Json(DataResponse::new(consumable)))
}

/// PUT /api/v1/consumables/{id}
pub async fn update(
    RequireWriter(user): RequireWriter,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateConsumable>,
) -> AppResult<Json<DataResponse<Consumable>>> {
    input.validate()?;
    validate_cost("unit_cost", input.unit_cost)?;

    let consumable = ConsumableRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::not_found("Consumable", id))?;
    state.publish_change(TABLE_CONSUMABLES, ChangeAction::Update, id, user.user_id, &consumable);
    Ok(Json(DataResponse::new(consumable)))
}

/// DELETE /api/v1/consumables/{id}
pub async fn delete(
    RequireWriter(user): RequireWriter,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !ConsumableRepo::delete(&state.pool, id).await? {
        return Err(AppError::not_found("Consumable", id));
    }
    state.publish_delete(TABLE_CONSUMABLES, id, user.user_id);
    Ok(StatusCode::NO_CONTENT)
}
