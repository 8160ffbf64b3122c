//! Handler for the `/changes` audit trail.

use assetrack_db::models::change_log::{ChangeLogEntry, ChangeLogParams};
use assetrack_db::repositories::ChangeLogRepo;
use axum::extract::{Query, State};
use axum::Json;

use crate::error::AppResult;
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/changes?table_name=&record_id=
///
/// Newest first. Admin only.
pub async fn list(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<ChangeLogParams>,
) -> AppResult<Json<DataResponse<Vec<ChangeLogEntry>>>> {
    let entries = ChangeLogRepo::list(&state.pool, &params).await?;
    Ok(Json(DataResponse::new(entries)))
}
