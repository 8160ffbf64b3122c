//! Handlers for the `/kits` resource (predefined kits).

use assetrack_core::change::{ChangeAction, TABLE_KITS};
use assetrack_core::error::CoreError;
use assetrack_core::inventory::{validate_one_of, VALID_ITEM_KINDS};
use assetrack_core::types::DbId;
use assetrack_db::models::kit::{CreateKit, KitItem, KitListParams, PredefinedKit, UpdateKit};
use assetrack_db::repositories::KitRepo;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAuth, RequireWriter};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/kits
pub async fn list(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Query(params): Query<KitListParams>,
) -> AppResult<Json<DataResponse<Vec<PredefinedKit>>>> {
    let kits = KitRepo::list(&state.pool, &params).await?;
    Ok(Json(DataResponse::new(kits)))
}

/// POST /api/v1/kits
pub async fn create(
    RequireWriter(user): RequireWriter,
    State(state): State<AppState>,
    Json(input): Json<CreateKit>,
) -> AppResult<(StatusCode, Json<DataResponse<PredefinedKit>>)> {
    input.validate()?;
    validate_items(&input.items)?;

    let kit = KitRepo::create(&state.pool, &input).await?;
    tracing::info!(kit_id = kit.id, items = kit.items.len(), "Kit created");
    state.publish_change(TABLE_KITS, ChangeAction::Insert, kit.id, user.user_id, &kit);
    Ok((StatusCode::CREATED, Json(DataResponse::new(kit))))
}

/// GET /api/v1/kits/{id}
pub async fn get_by_id(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<PredefinedKit>>> {
    let kit = KitRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Kit", id))?;
    Ok(Json(DataResponse::new(kit)))
}

/// PUT /api/v1/kits/{id}
///
/// A supplied `items` list replaces the stored one.
pub async fn update(
    RequireWriter(user): RequireWriter,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateKit>,
) -> AppResult<Json<DataResponse<PredefinedKit>>> {
    input.validate()?;
    if let Some(items) = &input.items {
        validate_items(items)?;
    }

    let kit = KitRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| AppError::not_found("Kit", id))?;
    state.publish_change(TABLE_KITS, ChangeAction::Update, id, user.user_id, &kit);
    Ok(Json(DataResponse::new(kit)))
}

/// DELETE /api/v1/kits/{id}
pub async fn delete(
    RequireWriter(user): RequireWriter,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !KitRepo::delete(&state.pool, id).await? {
        return Err(AppError::not_found("Kit", id));
    }
    state.publish_delete(TABLE_KITS, id, user.user_id);
    Ok(StatusCode::NO_CONTENT)
}

/// Every entry names a known item kind, and no item appears twice.
fn validate_items(items: &[KitItem]) -> Result<(), CoreError> {
    for (i, item) in items.iter().enumerate() {
        validate_one_of("item_type", &item.item_type, VALID_ITEM_KINDS)?;
        let duplicate = items[..i]
            .iter()
            .any(|prev| prev.item_type == item.item_type && prev.item_id == item.item_id);
        if duplicate {
            return Err(CoreError::Validation(format!(
                "Kit lists {} {} more than once",
                item.item_type, item.item_id
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(kind: &str, id: DbId) -> KitItem {
        KitItem {
            item_type: kind.to_string(),
            item_id: id,
            quantity: 1,
        }
    }

    #[test]
    fn known_kinds_pass() {
        assert!(validate_items(&[item("asset", 1), item("license", 1)]).is_ok());
    }

    #[test]
    fn unknown_kind_rejected() {
        assert!(validate_items(&[item("gadget", 1)]).is_err());
    }

    #[test]
    fn repeated_item_rejected() {
        assert!(validate_items(&[item("accessory", 4), item("accessory", 4)]).is_err());
    }
}
