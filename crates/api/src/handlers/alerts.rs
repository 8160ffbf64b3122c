//! Handlers for the `/alerts` resource.

use assetrack_core::change::{ChangeAction, TABLE_ALERTS};
use assetrack_core::inventory::{validate_optional_one_of, VALID_SEVERITIES};
use assetrack_core::types::DbId;
use assetrack_db::models::alert::{Alert, AlertListParams, CreateAlert, UpdateAlert};
use assetrack_db::repositories::AlertRepo;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAuth, RequireWriter};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/alerts
///
/// Resolved alerts are hidden unless `?include_resolved=true`.
pub async fn list(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Query(params): Query<AlertListParams>,
) -> AppResult<Json<DataResponse<Vec<Alert>>>> {
    let alerts = AlertRepo::list(&state.pool, &params).await?;
    Ok(Json(DataResponse::new(alerts)))
}

/// POST /api/v1/alerts
pub async fn create(
    RequireWriter(user): RequireWriter,
    State(state): State<AppState>,
    Json(input): Json<CreateAlert>,
) -> AppResult<(StatusCode, Json<DataResponse<Alert>>)> {
    input.validate()?;
    validate_optional_one_of("severity", input.severity.as_deref(), VALID_SEVERITIES)?;

    let alert = AlertRepo::create(&state.pool, &input).await?;
    tracing::info!(alert_id = alert.id, alert_type = %alert.alert_type, "Alert raised");
    state.publish_change(TABLE_ALERTS, ChangeAction::Insert, alert.id, user.user_id, &alert);
    Ok((StatusCode::CREATED, Json(DataResponse::new(alert))))
}

/// GET /api/v1/alerts/{id}
pub async fn get_by_id(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Alert>>> {
    let alert = AlertRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Alert", id))?;
    Ok(Json(DataResponse::new(alert)))
}

/// PUT /api/v1/alerts/{id}
pub async fn update(
    RequireWriter(user): RequireWriter,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateAlert>,
) -> AppResult<Json<DataResponse<Alert>>> {
    input.validate()?;
    validate_optional_one_of("severity", input.severity.as_deref(), VALID_SEVERITIES)?;

    let alert = AlertRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::not_found("Alert", id))?;
    state.publish_change(TABLE_ALERTS, ChangeAction::Update, id, user.user_id, &alert);
    Ok(Json(DataResponse::new(alert)))
}

/// POST /api/v1/alerts/{id}/resolve
///
/// Idempotent: resolving an already-resolved alert keeps its original
/// `resolved_at`.
pub async fn resolve(
    RequireWriter(user): RequireWriter,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Alert>>> {
    let alert = AlertRepo::resolve(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Alert", id))?;
    tracing::info!(alert_id = id, user_id = user.user_id, "Alert resolved");
    state.publish_change(TABLE_ALERTS, ChangeAction::Update, id, user.user_id, &alert);
    Ok(Json(DataResponse::new(alert)))
}

/// DELETE /api/v1/alerts/{id}
pub async fn delete(
    RequireWriter(user): RequireWriter,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !AlertRepo::delete(&state.pool, id).await? {
        return Err(AppError::not_found("Alert", id));
    }
    state.publish_delete(TABLE_ALERTS, id, user.user_id);
    Ok(StatusCode::NO_CONTENT)
}
