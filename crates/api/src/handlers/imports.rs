//! Handlers for the `/imports` resource (import run bookkeeping).

use assetrack_core::change::{ChangeAction, TABLE_IMPORTS, TABLE_INTEGRATIONS};
use assetrack_core::error::CoreError;
use assetrack_core::inventory::{
    validate_one_of, validate_optional_one_of, IMPORT_COMPLETED, VALID_IMPORT_STATUSES,
    VALID_ITEM_KINDS,
};
use assetrack_core::types::DbId;
use assetrack_db::models::import_record::{
    CreateImportRecord, ImportListParams, ImportRecord, UpdateImportRecord,
};
use assetrack_db::repositories::{ImportRecordRepo, IntegrationRepo};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAuth, RequireWriter};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/imports
pub async fn list(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Query(params): Query<ImportListParams>,
) -> AppResult<Json<DataResponse<Vec<ImportRecord>>>> {
    let rows = ImportRecordRepo::list(&state.pool, &params).await?;
    Ok(Json(DataResponse::new(rows)))
}

/// POST /api/v1/imports
pub async fn create(
    RequireWriter(user): RequireWriter,
    State(state): State<AppState>,
    Json(input): Json<CreateImportRecord>,
) -> AppResult<(StatusCode, Json<DataResponse<ImportRecord>>)> {
    input.validate()?;
    validate_one_of("entity_type", &input.entity_type, VALID_ITEM_KINDS)?;

    let record = ImportRecordRepo::create(&state.pool, &input).await?;
    tracing::info!(import_id = record.id, file = %record.file_name, "Import registered");
    state.publish_change(TABLE_IMPORTS, ChangeAction::Insert, record.id, user.user_id, &record);
    Ok((StatusCode::CREATED, Json(DataResponse::new(record))))
}

/// GET /api/v1/imports/{id}
pub async fn get_by_id(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<ImportRecord>>> {
    let record = find(&state, id).await?;
    Ok(Json(DataResponse::new(record)))
}

/// PUT /api/v1/imports/{id}
///
/// Row counters must satisfy `imported + failed <= total`. Completing an
/// import linked to an integration stamps the integration's `last_sync_at`.
pub async fn update(
    RequireWriter(user): RequireWriter,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateImportRecord>,
) -> AppResult<Json<DataResponse<ImportRecord>>> {
    input.validate()?;
    validate_optional_one_of("status", input.status.as_deref(), VALID_IMPORT_STATUSES)?;

    let current = find(&state, id).await?;
    validate_row_counts(
        input.total_rows.unwrap_or(current.total_rows),
        input.imported_rows.unwrap_or(current.imported_rows),
        input.failed_rows.unwrap_or(current.failed_rows),
    )?;

    let record = ImportRecordRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::not_found("ImportRecord", id))?;
    state.publish_change(TABLE_IMPORTS, ChangeAction::Update, id, user.user_id, &record);

    let just_completed = record.status == IMPORT_COMPLETED && current.status != IMPORT_COMPLETED;
    if let (true, Some(integration_id)) = (just_completed, record.integration_id) {
        let touched = IntegrationRepo::touch_last_sync(&state.pool, integration_id).await?;
        if let Some(integration) = touched {
            tracing::info!(integration_id, import_id = id, "Integration sync recorded");
            state.publish_change(
                TABLE_INTEGRATIONS,
                ChangeAction::Update,
                integration_id,
                user.user_id,
                &integration,
            );
        }
    }

    Ok(Json(DataResponse::new(record)))
}

/// DELETE /api/v1/imports/{id}
pub async fn delete(
    RequireWriter(user): RequireWriter,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !ImportRecordRepo::delete(&state.pool, id).await? {
        return Err(AppError::not_found("ImportRecord", id));
    }
    state.publish_delete(TABLE_IMPORTS, id, user.user_id);
    Ok(StatusCode::NO_CONTENT)
}

async fn find(state: &AppState, id: DbId) -> AppResult<ImportRecord> {
    ImportRecordRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("ImportRecord", id))
}

fn validate_row_counts(total: i32, imported: i32, failed: i32) -> Result<(), CoreError> {
    if imported + failed > total {
        return Err(CoreError::Validation(format!(
            "imported_rows ({imported}) + failed_rows ({failed}) exceed total_rows ({total})"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_within_total_accepted() {
        assert!(validate_row_counts(10, 7, 3).is_ok());
        assert!(validate_row_counts(0, 0, 0).is_ok());
    }

    #[test]
    fn counts_over_total_rejected() {
        assert!(validate_row_counts(10, 8, 3).is_err());
    }
}
