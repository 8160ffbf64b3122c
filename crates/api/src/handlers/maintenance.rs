//! Handlers for the `/maintenance` resource.

use assetrack_core::change::{ChangeAction, TABLE_MAINTENANCE};
use assetrack_core::error::CoreError;
use assetrack_core::inventory::{
    validate_cost, validate_one_of, validate_optional_one_of, VALID_MAINTENANCE_STATUSES,
    VALID_MAINTENANCE_TYPES,
};
use assetrack_core::types::{Date, DbId};
use assetrack_db::models::maintenance::{
    CreateMaintenanceRecord, MaintenanceListParams, MaintenanceRecord, UpdateMaintenanceRecord,
};
use assetrack_db::repositories::MaintenanceRepo;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAuth, RequireWriter};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/maintenance
pub async fn list(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Query(params): Query<MaintenanceListParams>,
) -> AppResult<Json<DataResponse<Vec<MaintenanceRecord>>>> {
    let records = MaintenanceRepo::list(&state.pool, &params).await?;
    Ok(Json(DataResponse::new(records)))
}

/// POST /api/v1/maintenance
pub async fn create(
    RequireWriter(user): RequireWriter,
    State(state): State<AppState>,
    Json(input): Json<CreateMaintenanceRecord>,
) -> AppResult<(StatusCode, Json<DataResponse<MaintenanceRecord>>)> {
    input.validate()?;
    validate_one_of("maintenance_type", &input.maintenance_type, VALID_MAINTENANCE_TYPES)?;
    validate_optional_one_of("status", input.status.as_deref(), VALID_MAINTENANCE_STATUSES)?;
    validate_cost("cost", input.cost)?;
    validate_dates(input.start_date, input.completion_date)?;

    let record = MaintenanceRepo::create(&state.pool, &input).await?;
    tracing::info!(maintenance_id = record.id, asset_id = record.asset_id, "Maintenance scheduled");
    state.publish_change(TABLE_MAINTENANCE, ChangeAction::Insert, record.id, user.user_id, &record);
    Ok((StatusCode::CREATED, Json(DataResponse::new(record))))
}

/// GET /api/v1/maintenance/{id}
pub async fn get_by_id(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<MaintenanceRecord>>> {
    let record = find(&state, id).await?;
    Ok(Json(DataResponse::new(record)))
}

/// PUT /api/v1/maintenance/{id}
pub async fn update(
    RequireWriter(user): RequireWriter,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateMaintenanceRecord>,
) -> AppResult<Json<DataResponse<MaintenanceRecord>>> {
    input.validate()?;
    validate_optional_one_of(
        "maintenance_type",
        input.maintenance_type.as_deref(),
        VALID_MAINTENANCE_TYPES,
    )?;
    validate_optional_one_of("status", input.status.as_deref(), VALID_MAINTENANCE_STATUSES)?;
    validate_cost("cost", input.cost)?;
    if input.start_date.is_some() || input.completion_date.is_some() {
        let current = find(&state, id).await?;
        validate_dates(
            input.start_date.or(current.start_date),
            input.completion_date.or(current.completion_date),
        )?;
    }

    let record = MaintenanceRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::not_found("MaintenanceRecord", id))?;
    state.publish_change(TABLE_MAINTENANCE, ChangeAction::Update, id, user.user_id, &record);
    Ok(Json(DataResponse::new(record)))
}

/// DELETE /api/v1/maintenance/{id}
pub async fn delete(
    RequireWriter(user): RequireWriter,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !MaintenanceRepo::delete(&state.pool, id).await? {
        return Err(AppError::not_found("MaintenanceRecord", id));
    }
    state.publish_delete(TABLE_MAINTENANCE, id, user.user_id);
    Ok(StatusCode::NO_CONTENT)
}

async fn find(state: &AppState, id: DbId) -> AppResult<MaintenanceRecord> {
    MaintenanceRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("MaintenanceRecord", id))
}

/// Completion cannot precede the start.
fn validate_dates(start: Option<Date>, completion: Option<Date>) -> Result<(), CoreError> {
    match (start, completion) {
        (Some(s), Some(c)) if c < s => Err(CoreError::Validation(format!(
            "completion_date ({c}) is before start_date ({s})"
        ))),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> Date {
        s.parse().unwrap()
    }

    #[test]
    fn completion_before_start_rejected() {
        assert!(validate_dates(Some(d("2026-03-10")), Some(d("2026-03-09"))).is_err());
    }

    #[test]
    fn same_day_or_open_ended_accepted() {
        assert!(validate_dates(Some(d("2026-03-10")), Some(d("2026-03-10"))).is_ok());
        assert!(validate_dates(Some(d("2026-03-10")), None).is_ok());
        assert!(validate_dates(None, Some(d("2026-03-10"))).is_ok());
    }
}
