//! Handlers for the `/reports` resource.

use assetrack_core::change::{ChangeAction, TABLE_REPORTS};
use assetrack_core::inventory::{validate_one_of, validate_optional_one_of, VALID_REPORT_TYPES};
use assetrack_core::types::DbId;
use assetrack_db::models::report::{CreateReport, Report, ReportListParams, UpdateReport};
use assetrack_db::repositories::ReportRepo;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use validator::Validate;

use crate::analytics;
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAuth, RequireWriter};
use crate::response::DataResponse;
use crate::state::AppState;

/// Result of `POST /reports/{id}/generate`.
#[derive(Debug, Serialize)]
pub struct GeneratedReport {
    pub report: Report,
    pub payload: serde_json::Value,
}

/// GET /api/v1/reports
pub async fn list(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Query(params): Query<ReportListParams>,
) -> AppResult<Json<DataResponse<Vec<Report>>>> {
    let reports = ReportRepo::list(&state.pool, &params).await?;
    Ok(Json(DataResponse::new(reports)))
}

/// POST /api/v1/reports
pub async fn create(
    RequireWriter(user): RequireWriter,
    State(state): State<AppState>,
    Json(input): Json<CreateReport>,
) -> AppResult<(StatusCode, Json<DataResponse<Report>>)> {
    input.validate()?;
    validate_one_of("report_type", &input.report_type, VALID_REPORT_TYPES)?;

    let report = ReportRepo::create(&state.pool, &input).await?;
    state.publish_change(TABLE_REPORTS, ChangeAction::Insert, report.id, user.user_id, &report);
    Ok((StatusCode::CREATED, Json(DataResponse::new(report))))
}

/// GET /api/v1/reports/{id}
pub async fn get_by_id(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Report>>> {
    let report = find(&state, id).await?;
    Ok(Json(DataResponse::new(report)))
}

/// PUT /api/v1/reports/{id}
pub async fn update(
    RequireWriter(user): RequireWriter,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateReport>,
) -> AppResult<Json<DataResponse<Report>>> {
    input.validate()?;
    validate_optional_one_of("report_type", input.report_type.as_deref(), VALID_REPORT_TYPES)?;

    let report = ReportRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::not_found("Report", id))?;
    state.publish_change(TABLE_REPORTS, ChangeAction::Update, id, user.user_id, &report);
    Ok(Json(DataResponse::new(report)))
}

/// DELETE /api/v1/reports/{id}
pub async fn delete(
    RequireWriter(user): RequireWriter,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !ReportRepo::delete(&state.pool, id).await? {
        return Err(AppError::not_found("Report", id));
    }
    state.publish_delete(TABLE_REPORTS, id, user.user_id);
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/reports/{id}/generate
///
/// Computes the metrics payload for the report's type and stamps
/// `last_generated_at`. The payload is returned, not stored.
pub async fn generate(
    RequireWriter(user): RequireWriter,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<GeneratedReport>>> {
    let report = find(&state, id).await?;
    let today = chrono::Utc::now().date_naive();
    let payload = analytics::generate_report(&state.pool, &report.report_type, today).await?;

    let report = ReportRepo::mark_generated(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Report", id))?;
    tracing::info!(report_id = id, report_type = %report.report_type, "Report generated");
    state.publish_change(TABLE_REPORTS, ChangeAction::Update, id, user.user_id, &report);

    Ok(Json(DataResponse::new(GeneratedReport { report, payload })))
}

async fn find(state: &AppState, id: DbId) -> AppResult<Report> {
    ReportRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Report", id))
}
