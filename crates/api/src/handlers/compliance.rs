//! Handlers for `/compliance-checks` and `/policy-violations`.

use assetrack_core::change::{ChangeAction, TABLE_COMPLIANCE_CHECKS, TABLE_POLICY_VIOLATIONS};
use assetrack_core::inventory::{
    validate_optional_one_of, VALID_COMPLIANCE_STATUSES, VALID_SEVERITIES,
    VALID_VIOLATION_STATUSES,
};
use assetrack_core::types::DbId;
use assetrack_db::models::compliance::{
    ComplianceCheck, ComplianceCheckListParams, CreateComplianceCheck, CreatePolicyViolation,
    PolicyViolation, PolicyViolationListParams, UpdateComplianceCheck, UpdatePolicyViolation,
};
use assetrack_db::repositories::{ComplianceCheckRepo, PolicyViolationRepo};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAuth, RequireWriter};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Compliance checks
// ---------------------------------------------------------------------------

/// GET /api/v1/compliance-checks
pub async fn list_checks(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Query(params): Query<ComplianceCheckListParams>,
) -> AppResult<Json<DataResponse<Vec<ComplianceCheck>>>> {
    let checks = ComplianceCheckRepo::list(&state.pool, &params).await?;
    Ok(Json(DataResponse::new(checks)))
}

/// POST /api/v1/compliance-checks
pub async fn create_check(
    RequireWriter(user): RequireWriter,
    State(state): State<AppState>,
    Json(input): Json<CreateComplianceCheck>,
) -> AppResult<(StatusCode, Json<DataResponse<ComplianceCheck>>)> {
    input.validate()?;
    validate_optional_one_of("status", input.status.as_deref(), VALID_COMPLIANCE_STATUSES)?;

    let check = ComplianceCheckRepo::create(&state.pool, &input).await?;
    state.publish_change(
        TABLE_COMPLIANCE_CHECKS,
        ChangeAction::Insert,
        check.id,
        user.user_id,
        &check,
    );
    Ok((StatusCode::CREATED, Json(DataResponse::new(check))))
}

/// GET /api/v1/compliance-checks/{id}
pub async fn get_check(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<ComplianceCheck>>> {
    let check = ComplianceCheckRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("ComplianceCheck", id))?;
    Ok(Json(DataResponse::new(check)))
}

/// PUT /api/v1/compliance-checks/{id}
///
/// A status change stamps `last_checked_at`.
pub async fn update_check(
    RequireWriter(user): RequireWriter,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateComplianceCheck>,
) -> AppResult<Json<DataResponse<ComplianceCheck>>> {
    input.validate()?;
    validate_optional_one_of("status", input.status.as_deref(), VALID_COMPLIANCE_STATUSES)?;

    let check = ComplianceCheckRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::not_found("ComplianceCheck", id))?;
    state.publish_change(TABLE_COMPLIANCE_CHECKS, ChangeAction::Update, id, user.user_id, &check);
    Ok(Json(DataResponse::new(check)))
}

/// DELETE /api/v1/compliance-checks/{id}
pub async fn delete_check(
    RequireWriter(user): RequireWriter,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !ComplianceCheckRepo::delete(&state.pool, id).await? {
        return Err(AppError::not_found("ComplianceCheck", id));
    }
    state.publish_delete(TABLE_COMPLIANCE_CHECKS, id, user.user_id);
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Policy violations
// ---------------------------------------------------------------------------

/// GET /api/v1/policy-violations
pub async fn list_violations(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Query(params): Query<PolicyViolationListParams>,
) -> AppResult<Json<DataResponse<Vec<PolicyViolation>>>> {
    let violations = PolicyViolationRepo::list(&state.pool, &params).await?;
    Ok(Json(DataResponse::new(violations)))
}

/// POST /api/v1/policy-violations
pub async fn create_violation(
    RequireWriter(user): RequireWriter,
    State(state): State<AppState>,
    Json(input): Json<CreatePolicyViolation>,
) -> AppResult<(StatusCode, Json<DataResponse<PolicyViolation>>)> {
    input.validate()?;
    validate_optional_one_of("severity", input.severity.as_deref(), VALID_SEVERITIES)?;

    let violation = PolicyViolationRepo::create(&state.pool, &input).await?;
    tracing::info!(
        violation_id = violation.id,
        policy = %violation.policy,
        "Policy violation recorded"
    );
    state.publish_change(
        TABLE_POLICY_VIOLATIONS,
        ChangeAction::Insert,
        violation.id,
        user.user_id,
        &violation,
    );
    Ok((StatusCode::CREATED, Json(DataResponse::new(violation))))
}

/// GET /api/v1/policy-violations/{id}
pub async fn get_violation(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<PolicyViolation>>> {
    let violation = PolicyViolationRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("PolicyViolation", id))?;
    Ok(Json(DataResponse::new(violation)))
}

/// PUT /api/v1/policy-violations/{id}
pub async fn update_violation(
    RequireWriter(user): RequireWriter,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdatePolicyViolation>,
) -> AppResult<Json<DataResponse<PolicyViolation>>> {
    input.validate()?;
    validate_optional_one_of("severity", input.severity.as_deref(), VALID_SEVERITIES)?;
    validate_optional_one_of("status", input.status.as_deref(), VALID_VIOLATION_STATUSES)?;

    let violation = PolicyViolationRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::not_found("PolicyViolation", id))?;
    state.publish_change(
        TABLE_POLICY_VIOLATIONS,
        ChangeAction::Update,
        id,
        user.user_id,
        &violation,
    );
    Ok(Json(DataResponse::new(violation)))
}

/// DELETE /api/v1/policy-violations/{id}
pub async fn delete_violation(
    RequireWriter(user): RequireWriter,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !PolicyViolationRepo::delete(&state.pool, id).await? {
        return Err(AppError::not_found("PolicyViolation", id));
    }
    state.publish_delete(TABLE_POLICY_VIOLATIONS, id, user.user_id);
    Ok(StatusCode::NO_CONTENT)
}
