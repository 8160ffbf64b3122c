//! Handlers for the `/dashboard` read-only aggregates.

use std::collections::BTreeMap;

use assetrack_core::metrics::{DashboardMetrics, UtilizationMetrics};
use axum::extract::{Query, State};
use axum::Json;

use crate::analytics::{self, ComplianceOverview, FinancialSummary, MaintenanceOverview};
use crate::error::AppResult;
use crate::middleware::rbac::RequireAuth;
use crate::query::BreakdownParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/dashboard/metrics
pub async fn metrics(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<DashboardMetrics>>> {
    let today = chrono::Utc::now().date_naive();
    let metrics = analytics::dashboard_metrics(&state.pool, today).await?;
    Ok(Json(DataResponse::new(metrics)))
}

/// GET /api/v1/dashboard/utilization
pub async fn utilization(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<UtilizationMetrics>>> {
    let utilization = analytics::utilization(&state.pool).await?;
    Ok(Json(DataResponse::new(utilization)))
}

/// GET /api/v1/dashboard/breakdown?field=category|status|manufacturer|location
pub async fn breakdown(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Query(params): Query<BreakdownParams>,
) -> AppResult<Json<DataResponse<BTreeMap<String, usize>>>> {
    let counts = analytics::breakdown(&state.pool, &params.field).await?;
    Ok(Json(DataResponse::new(counts)))
}

/// GET /api/v1/dashboard/financials
pub async fn financials(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<FinancialSummary>>> {
    let today = chrono::Utc::now().date_naive();
    let summary = analytics::financials(&state.pool, today).await?;
    Ok(Json(DataResponse::new(summary)))
}

/// GET /api/v1/dashboard/compliance
pub async fn compliance(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<ComplianceOverview>>> {
    let overview = analytics::compliance(&state.pool).await?;
    Ok(Json(DataResponse::new(overview)))
}

/// GET /api/v1/dashboard/maintenance
pub async fn maintenance(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<MaintenanceOverview>>> {
    let overview = analytics::maintenance(&state.pool).await?;
    Ok(Json(DataResponse::new(overview)))
}
