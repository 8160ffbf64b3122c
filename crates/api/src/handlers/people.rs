//! Handlers for the `/people` resource.

use assetrack_core::change::{ChangeAction, TABLE_PEOPLE};
use assetrack_core::types::DbId;
use assetrack_db::models::person::{
    CreatePerson, Person, PersonHoldings, PersonListParams, UpdatePerson,
};
use assetrack_db::repositories::{AssetRepo, LicenseRepo, PersonRepo};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAuth, RequireWriter};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/people
///
/// Inactive people are hidden unless `?include_inactive=true`.
pub async fn list(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Query(params): Query<PersonListParams>,
) -> AppResult<Json<DataResponse<Vec<Person>>>> {
    let people = PersonRepo::list(&state.pool, &params).await?;
    Ok(Json(DataResponse::new(people)))
}

/// POST /api/v1/people
pub async fn create(
    RequireWriter(user): RequireWriter,
    State(state): State<AppState>,
    Json(input): Json<CreatePerson>,
) -> AppResult<(StatusCode, Json<DataResponse<Person>>)> {
    input.validate()?;
    let person = PersonRepo::create(&state.pool, &input).await?;
    tracing::info!(person_id = person.id, user_id = user.user_id, "Person created");
    state.publish_change(TABLE_PEOPLE, ChangeAction::Insert, person.id, user.user_id, &person);
    Ok((StatusCode::CREATED, Json(DataResponse::new(person))))
}

/// GET /api/v1/people/{id}
pub async fn get_by_id(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Person>>> {
    let person = find(&state, id).await?;
    Ok(Json(DataResponse::new(person)))
}

/// GET /api/v1/people/{id}/holdings
///
/// The person together with the assets and licenses assigned to them.
pub async fn holdings(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<PersonHoldings>>> {
    let person = find(&state, id).await?;
    let assets = AssetRepo::list_for_person(&state.pool, id).await?;
    let licenses = LicenseRepo::list_for_person(&state.pool, id).await?;
    Ok(Json(DataResponse::new(PersonHoldings {
        person,
        assets,
        licenses,
    })))
}

/// PUT /api/v1/people/{id}
pub async fn update(
    RequireWriter(user): RequireWriter,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdatePerson>,
) -> AppResult<Json<DataResponse<Person>>> {
    input.validate()?;
    let person = PersonRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::not_found("Person", id))?;
    state.publish_change(TABLE_PEOPLE, ChangeAction::Update, id, user.user_id, &person);
    Ok(Json(DataResponse::new(person)))
}

/// DELETE /api/v1/people/{id}
///
/// Assets and licenses assigned to the person are unassigned by the schema.
pub async fn delete(
    RequireWriter(user): RequireWriter,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !PersonRepo::delete(&state.pool, id).await? {
        return Err(AppError::not_found("Person", id));
    }
    tracing::info!(person_id = id, user_id = user.user_id, "Person deleted");
    state.publish_delete(TABLE_PEOPLE, id, user.user_id);
    Ok(StatusCode::NO_CONTENT)
}

async fn find(state: &AppState, id: DbId) -> AppResult<Person> {
    PersonRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Person", id))
}
