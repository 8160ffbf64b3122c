//! Handlers for the `/accessories` resource.

use assetrack_core::change::{ChangeAction, TABLE_ACCESSORIES};
use assetrack_core::inventory::{merged_quantities, validate_cost, validate_quantities};
use assetrack_core::types::DbId;
use assetrack_db::models::accessory::{
    Accessory, AccessoryListParams, CreateAccessory, UpdateAccessory,
};
use assetrack_db::repositories::AccessoryRepo;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAuth, RequireWriter};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/accessories
pub async fn list(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Query(params): Query<AccessoryListParams>,
) -> AppResult<Json<DataResponse<Vec<Accessory>>>> {
    let rows = AccessoryRepo::list(&state.pool, &params).await?;
    Ok(Json(DataResponse::new(rows)))
}

/// POST /api/v1/accessories
pub async fn create(
    RequireWriter(user): RequireWriter,
    State(state): State<AppState>,
    Json(input): Json<CreateAccessory>,
) -> AppResult<(StatusCode, Json<DataResponse<Accessory>>)> {
    input.validate()?;
    validate_quantities(
        input.quantity,
        input.available_quantity.unwrap_or(input.quantity),
    )?;
    validate_cost("purchase_cost", input.purchase_cost)?;

    let accessory = AccessoryRepo::create(&state.pool, &input).await?;
    tracing::info!(accessory_id = accessory.id, user_id = user.user_id, "Accessory created");
    state.publish_change(
        TABLE_ACCESSORIES,
        ChangeAction::Insert,
        accessory.id,
        user.user_id,
        &accessory,
    );
    Ok((StatusCode::CREATED, Json(DataResponse::new(accessory))))
}

/// GET /api/v1/accessories/{id}
pub async fn get_by_id(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Accessory>>> {
    let accessory = AccessoryRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Accessory", id))?;
    Ok(Json(DataResponse::new(accessory)))
}

/// PUT /api/v1/accessories/{id}
pub async fn update(
    RequireWriter(user): RequireWriter,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateAccessory>,
) -> AppResult<Json<DataResponse<Accessory>>> {
    input.validate()?;
    validate_cost("purchase_cost", input.purchase_cost)?;
    if input.quantity.is_some() || input.available_quantity.is_some() {
        let current = AccessoryRepo::find_by_id(&state.pool, id)
            .await?
            .ok_or_else(|| AppError::not_found("Accessory", id))?;
        merged_quantities(
            (current.quantity, current.available_quantity),
            input.quantity,
            input.available_quantity,
        )?;
    }

    let accessory = AccessoryRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::not_found("Accessory", id))?;
    state.publish_change(TABLE_ACCESSORIES, ChangeAction::Update, id, user.user_id, &accessory);
    Ok(Json(DataResponse::new(accessory)))
}

/// DELETE /api/v1/accessories/{id}
pub async fn delete(
    RequireWriter(user): RequireWriter,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !AccessoryRepo::delete(&state.pool, id).await? {
        return Err(AppError::not_found("Accessory", id));
    }
    state.publish_delete(TABLE_ACCESSORIES, id, user.user_id);
    Ok(StatusCode::NO_CONTENT)
}
