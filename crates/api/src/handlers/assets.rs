//! Handlers for the `/assets` resource.

use assetrack_core::change::{ChangeAction, TABLE_ASSETS};
use assetrack_core::inventory::{validate_cost, validate_optional_one_of, VALID_ASSET_STATUSES};
use assetrack_core::types::DbId;
use assetrack_db::models::asset::{Asset, AssetListParams, CreateAsset, UpdateAsset};
use assetrack_db::repositories::AssetRepo;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAuth, RequireWriter};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/assets
pub async fn list(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Query(params): Query<AssetListParams>,
) -> AppResult<Json<DataResponse<Vec<Asset>>>> {
    let assets = AssetRepo::list(&state.pool, &params).await?;
    Ok(Json(DataResponse::new(assets)))
}

/// POST /api/v1/assets
pub async fn create(
    RequireWriter(user): RequireWriter,
    State(state): State<AppState>,
    Json(input): Json<CreateAsset>,
) -> AppResult<(StatusCode, Json<DataResponse<Asset>>)> {
    input.validate()?;
    validate_optional_one_of("status", input.status.as_deref(), VALID_ASSET_STATUSES)?;
    validate_cost("purchase_cost", input.purchase_cost)?;

    let asset = AssetRepo::create(&state.pool, &input).await?;
    tracing::info!(
        asset_id = asset.id,
        tag = %asset.asset_tag,
        user_id = user.user_id,
        "Asset created"
    );
    state.publish_change(TABLE_ASSETS, ChangeAction::Insert, asset.id, user.user_id, &asset);
    Ok((StatusCode::CREATED, Json(DataResponse::new(asset))))
}

/// GET /api/v1/assets/{id}
pub async fn get_by_id(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Asset>>> {
    let asset = AssetRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Asset", id))?;
    Ok(Json(DataResponse::new(asset)))
}

/// PUT /api/v1/assets/{id}
pub async fn update(
    RequireWriter(user): RequireWriter,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateAsset>,
) -> AppResult<Json<DataResponse<Asset>>> {
    input.validate()?;
    validate_optional_one_of("status", input.status.as_deref(), VALID_ASSET_STATUSES)?;
    validate_cost("purchase_cost", input.purchase_cost)?;

    let asset = AssetRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::not_found("Asset", id))?;
    state.publish_change(TABLE_ASSETS, ChangeAction::Update, id, user.user_id, &asset);
    Ok(Json(DataResponse::new(asset)))
}

/// DELETE /api/v1/assets/{id}
pub async fn delete(
    RequireWriter(user): RequireWriter,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !AssetRepo::delete(&state.pool, id).await? {
        return Err(AppError::not_found("Asset", id));
    }
    tracing::info!(asset_id = id, user_id = user.user_id, "Asset deleted");
    state.publish_delete(TABLE_ASSETS, id, user.user_id);
    Ok(StatusCode::NO_CONTENT)
}
