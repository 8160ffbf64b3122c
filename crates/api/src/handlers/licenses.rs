//! Handlers for the `/licenses` resource, including seat checkout/checkin.

use assetrack_core::change::{ChangeAction, TABLE_LICENSES};
use assetrack_core::error::CoreError;
use assetrack_core::inventory::{merged_seats, validate_cost, validate_seats};
use assetrack_core::types::DbId;
use assetrack_db::models::license::{CreateLicense, License, LicenseListParams, UpdateLicense};
use assetrack_db::repositories::LicenseRepo;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAuth, RequireWriter};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/licenses
pub async fn list(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Query(params): Query<LicenseListParams>,
) -> AppResult<Json<DataResponse<Vec<License>>>> {
    let licenses = LicenseRepo::list(&state.pool, &params).await?;
    Ok(Json(DataResponse::new(licenses)))
}

/// POST /api/v1/licenses
///
/// `available_seats` defaults to `seats` when omitted.
pub async fn create(
    RequireWriter(user): RequireWriter,
    State(state): State<AppState>,
    Json(input): Json<CreateLicense>,
) -> AppResult<(StatusCode, Json<DataResponse<License>>)> {
    input.validate()?;
    validate_seats(input.seats, input.available_seats.unwrap_or(input.seats))?;
    validate_cost("purchase_cost", input.purchase_cost)?;

    let license = LicenseRepo::create(&state.pool, &input).await?;
    tracing::info!(
        license_id = license.id,
        seats = license.seats,
        user_id = user.user_id,
        "License created"
    );
    state.publish_change(TABLE_LICENSES, ChangeAction::Insert, license.id, user.user_id, &license);
    Ok((StatusCode::CREATED, Json(DataResponse::new(license))))
}

/// GET /api/v1/licenses/{id}
pub async fn get_by_id(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<License>>> {
    let license = find(&state, id).await?;
    Ok(Json(DataResponse::new(license)))
}

/// PUT /api/v1/licenses/{id}
///
/// The seat pair is checked against the stored row, so lowering `seats`
/// below the current `available_seats` is rejected.
pub async fn update(
    RequireWriter(user): RequireWriter,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateLicense>,
) -> AppResult<Json<DataResponse<License>>> {
    input.validate()?;
    validate_cost("purchase_cost", input.purchase_cost)?;
    if input.seats.is_some() || input.available_seats.is_some() {
        let current = find(&state, id).await?;
        merged_seats(
            (current.seats, current.available_seats),
            input.seats,
            input.available_seats,
        )?;
    }

    let license = LicenseRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::not_found("License", id))?;
    state.publish_change(TABLE_LICENSES, ChangeAction::Update, id, user.user_id, &license);
    Ok(Json(DataResponse::new(license)))
}

/// DELETE /api/v1/licenses/{id}
pub async fn delete(
    RequireWriter(user): RequireWriter,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !LicenseRepo::delete(&state.pool, id).await? {
        return Err(AppError::not_found("License", id));
    }
    tracing::info!(license_id = id, user_id = user.user_id, "License deleted");
    state.publish_delete(TABLE_LICENSES, id, user.user_id);
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/licenses/{id}/checkout
///
/// Takes one seat. 409 when none are available.
pub async fn checkout(
    RequireWriter(user): RequireWriter,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<License>>> {
    let Some(license) = LicenseRepo::checkout_seat(&state.pool, id).await? else {
        find(&state, id).await?;
        return Err(AppError::Core(CoreError::Conflict(format!(
            "License {id} has no available seats"
        ))));
    };
    tracing::info!(
        license_id = id,
        available = license.available_seats,
        user_id = user.user_id,
        "License seat checked out"
    );
    state.publish_change(TABLE_LICENSES, ChangeAction::Update, id, user.user_id, &license);
    Ok(Json(DataResponse::new(license)))
}

/// POST /api/v1/licenses/{id}/checkin
///
/// Returns one seat. 409 when every seat is already available.
pub async fn checkin(
    RequireWriter(user): RequireWriter,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<License>>> {
    let Some(license) = LicenseRepo::checkin_seat(&state.pool, id).await? else {
        find(&state, id).await?;
        return Err(AppError::Core(CoreError::Conflict(format!(
            "License {id} has no seats checked out"
        ))));
    };
    tracing::info!(
        license_id = id,
        available = license.available_seats,
        user_id = user.user_id,
        "License seat checked in"
    );
    state.publish_change(TABLE_LICENSES, ChangeAction::Update, id, user.user_id, &license);
    Ok(Json(DataResponse::new(license)))
}

async fn find(state: &AppState, id: DbId) -> AppResult<License> {
    LicenseRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("License", id))
}
