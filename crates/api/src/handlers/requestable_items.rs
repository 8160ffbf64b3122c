//! Handlers for the `/requestable-items` resource.

use assetrack_core::change::{ChangeAction, TABLE_REQUESTABLE_ITEMS};
use assetrack_core::inventory::{validate_one_of, validate_optional_one_of, VALID_ITEM_KINDS};
use assetrack_core::types::DbId;
use assetrack_db::models::requestable_item::{
    CreateRequestableItem, RequestableItem, RequestableItemListParams, UpdateRequestableItem,
};
use assetrack_db::repositories::RequestableItemRepo;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAuth, RequireWriter};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/requestable-items
pub async fn list(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Query(params): Query<RequestableItemListParams>,
) -> AppResult<Json<DataResponse<Vec<RequestableItem>>>> {
    let rows = RequestableItemRepo::list(&state.pool, &params).await?;
    Ok(Json(DataResponse::new(rows)))
}

/// POST /api/v1/requestable-items
pub async fn create(
    RequireWriter(user): RequireWriter,
    State(state): State<AppState>,
    Json(input): Json<CreateRequestableItem>,
) -> AppResult<(StatusCode, Json<DataResponse<RequestableItem>>)> {
    input.validate()?;
    validate_one_of("item_type", &input.item_type, VALID_ITEM_KINDS)?;

    let item = RequestableItemRepo::create(&state.pool, &input).await?;
    state.publish_change(
        TABLE_REQUESTABLE_ITEMS,
        ChangeAction::Insert,
        item.id,
        user.user_id,
        &item,
    );
    Ok((StatusCode::CREATED, Json(DataResponse::new(item))))
}

/// GET /api/v1/requestable-items/{id}
pub async fn get_by_id(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<RequestableItem>>> {
    let item = RequestableItemRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("RequestableItem", id))?;
    Ok(Json(DataResponse::new(item)))
}

/// PUT /api/v1/requestable-items/{id}
pub async fn update(
    RequireWriter(user): RequireWriter,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateRequestableItem>,
) -> AppResult<Json<DataResponse<RequestableItem>>> {
    input.validate()?;
    validate_optional_one_of("item_type", input.item_type.as_deref(), VALID_ITEM_KINDS)?;

    let item = RequestableItemRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::not_found("RequestableItem", id))?;
    state.publish_change(TABLE_REQUESTABLE_ITEMS, ChangeAction::Update, id, user.user_id, &item);
    Ok(Json(DataResponse::new(item)))
}

/// DELETE /api/v1/requestable-items/{id}
pub async fn delete(
    RequireWriter(user): RequireWriter,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !RequestableItemRepo::delete(&state.pool, id).await? {
        return Err(AppError::not_found("RequestableItem", id));
    }
    state.publish_delete(TABLE_REQUESTABLE_ITEMS, id, user.user_id);
    Ok(StatusCode::NO_CONTENT)
}
