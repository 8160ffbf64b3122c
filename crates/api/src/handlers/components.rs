//! Handlers for the `/components` resource.

use assetrack_core::change::{ChangeAction, TABLE_COMPONENTS};
use assetrack_core::inventory::{merged_quantities, validate_cost, validate_quantities};
use assetrack_core::types::DbId;
use assetrack_db::models::component::{
    Component, ComponentListParams, CreateComponent, UpdateComponent,
};
use assetrack_db::repositories::ComponentRepo;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAuth, RequireWriter};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/components
pub async fn list(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Query(params): Query<ComponentListParams>,
) -> AppResult<Json<DataResponse<Vec<Component>>>> {
    let rows = ComponentRepo::list(&state.pool, &params).await?;
    Ok(Json(DataResponse::new(rows)))
}

/// POST /api/v1/components
pub async fn create(
    RequireWriter(user): RequireWriter,
    State(state): State<AppState>,
    Json(input): Json<CreateComponent>,
) -> AppResult<(StatusCode, Json<DataResponse<Component>>)> {
    input.validate()?;
    validate_quantities(
        input.quantity,
        input.available_quantity.unwrap_or(input.quantity),
    )?;
    validate_cost("purchase_cost", input.purchase_cost)?;

    let component = ComponentRepo::create(&state.pool, &input).await?;
    tracing::info!(
        component_id = component.id,
        asset_id = ?component.asset_id,
        "Component created"
    );
    state.publish_change(
        TABLE_COMPONENTS,
        ChangeAction::Insert,
        component.id,
        user.user_id,
        &component,
    );
    Ok((StatusCode::CREATED, Json(DataResponse::new(component))))
}

/// GET /api/v1/components/{id}
pub async fn get_by_id(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Component>>> {
    let component = ComponentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Component", id))?;
    Ok(Json(DataResponse::new(component)))
}

/// PUT /api/v1/components/{id}
pub async fn update(
    RequireWriter(user): RequireWriter,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateComponent>,
) -> AppResult<Json<DataResponse<Component>>> {
    input.validate()?;
    validate_cost("purchase_cost", input.purchase_cost)?;
    if input.quantity.is_some() || input.available_quantity.is_some() {
        let current = ComponentRepo::find_by_id(&state.pool, id)
            .await?
            .ok_or_else(|| AppError::not_found("Component", id))?;
        merged_quantities(
            (current.quantity, current.available_quantity),
            input.quantity,
            input.available_quantity,
        )?;
    }

    let component = ComponentRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::not_found("Component", id))?;
    state.publish_change(TABLE_COMPONENTS, ChangeAction::Update, id, user.user_id, &component);
    Ok(Json(DataResponse::new(component)))
}

/// DELETE /api/v1/components/{id}
pub async fn delete(
    RequireWriter(user): RequireWriter,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !ComponentRepo::delete(&state.pool, id).await? {
        return Err(AppError::not_found("Component", id));
    }
    state.publish_delete(TABLE_COMPONENTS, id, user.user_id);
    Ok(StatusCode::NO_CONTENT)
}
