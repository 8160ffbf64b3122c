//! Handlers for the `/integrations` resource.

use assetrack_core::change::{ChangeAction, TABLE_INTEGRATIONS};
use assetrack_core::integration::{apply_field_mapping, validate_field_mappings};
use assetrack_core::inventory::{validate_optional_one_of, VALID_INTEGRATION_STATUSES};
use assetrack_core::types::DbId;
use assetrack_db::models::integration::{
    CreateIntegration, Integration, IntegrationListParams, MappingPreviewRequest,
    UpdateIntegration,
};
use assetrack_db::repositories::IntegrationRepo;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAuth, RequireWriter};
use crate::response::DataResponse;
use crate::state::AppState;

/// Largest sample accepted by the mapping preview.
const MAX_PREVIEW_ROWS: usize = 100;

/// GET /api/v1/integrations
pub async fn list(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Query(params): Query<IntegrationListParams>,
) -> AppResult<Json<DataResponse<Vec<Integration>>>> {
    let rows = IntegrationRepo::list(&state.pool, &params).await?;
    Ok(Json(DataResponse::new(rows)))
}

/// POST /api/v1/integrations
pub async fn create(
    RequireWriter(user): RequireWriter,
    State(state): State<AppState>,
    Json(input): Json<CreateIntegration>,
) -> AppResult<(StatusCode, Json<DataResponse<Integration>>)> {
    input.validate()?;
    validate_optional_one_of("status", input.status.as_deref(), VALID_INTEGRATION_STATUSES)?;
    if let Some(mappings) = &input.field_mappings {
        validate_field_mappings(mappings)?;
    }

    let integration = IntegrationRepo::create(&state.pool, &input).await?;
    tracing::info!(
        integration_id = integration.id,
        provider = %integration.provider,
        "Integration created"
    );
    state.publish_change(
        TABLE_INTEGRATIONS,
        ChangeAction::Insert,
        integration.id,
        user.user_id,
        &integration,
    );
    Ok((StatusCode::CREATED, Json(DataResponse::new(integration))))
}

/// GET /api/v1/integrations/{id}
pub async fn get_by_id(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Integration>>> {
    let integration = find(&state, id).await?;
    Ok(Json(DataResponse::new(integration)))
}

/// PUT /api/v1/integrations/{id}
pub async fn update(
    RequireWriter(user): RequireWriter,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateIntegration>,
) -> AppResult<Json<DataResponse<Integration>>> {
    input.validate()?;
    validate_optional_one_of("status", input.status.as_deref(), VALID_INTEGRATION_STATUSES)?;
    if let Some(mappings) = &input.field_mappings {
        validate_field_mappings(mappings)?;
    }

    let integration = IntegrationRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::not_found("Integration", id))?;
    state.publish_change(TABLE_INTEGRATIONS, ChangeAction::Update, id, user.user_id, &integration);
    Ok(Json(DataResponse::new(integration)))
}

/// DELETE /api/v1/integrations/{id}
///
/// Import records keep their history; their `integration_id` is cleared.
pub async fn delete(
    RequireWriter(user): RequireWriter,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !IntegrationRepo::delete(&state.pool, id).await? {
        return Err(AppError::not_found("Integration", id));
    }
    state.publish_delete(TABLE_INTEGRATIONS, id, user.user_id);
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/integrations/{id}/preview-mapping
///
/// Applies the integration's stored field mapping to sample rows without
/// writing anything.
pub async fn preview_mapping(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<MappingPreviewRequest>,
) -> AppResult<Json<DataResponse<Vec<serde_json::Value>>>> {
    if input.rows.len() > MAX_PREVIEW_ROWS {
        return Err(AppError::BadRequest(format!(
            "At most {MAX_PREVIEW_ROWS} rows can be previewed"
        )));
    }
    let integration = find(&state, id).await?;
    let mapped = input
        .rows
        .iter()
        .map(|row| apply_field_mapping(row, &integration.field_mappings))
        .collect();
    Ok(Json(DataResponse::new(mapped)))
}

async fn find(state: &AppState, id: DbId) -> AppResult<Integration> {
    IntegrationRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Integration", id))
}
