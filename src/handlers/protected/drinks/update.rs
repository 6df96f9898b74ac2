// handlers/protected/drinks/update.rs - PATCH /drinks/:id handler

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::HeaderMap,
    Json,
};
use tracing::info;

use crate::auth::permissions;
use crate::database::models::Drink;
use crate::error::ApiError;
use crate::handlers::{parse_drink_id, reject_body, DrinkPayload, DrinksBody};
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

/// PATCH /drinks/:id - replace the title and/or recipe of a drink.
/// Requires `patch:drinks`. Repeating the same patch leaves the same drink.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    body: Result<Json<DrinkPayload>, JsonRejection>,
) -> ApiResult<DrinksBody<Drink>> {
    let claims = state
        .auth
        .requires_auth(&headers, permissions::PATCH_DRINKS)
        .await?;

    let Json(payload) = body.map_err(reject_body)?;
    let id = parse_drink_id(&id)?;

    let mut drink = state
        .store
        .find_by_id(id)
        .await
        .map_err(ApiError::write_failed)?
        .ok_or(ApiError::NotFound)?;

    payload.apply_to(&mut drink);
    state
        .store
        .update(&drink)
        .await
        .map_err(ApiError::write_failed)?;

    info!(drink_id = drink.id, sub = ?claims.sub, "Updated drink");
    Ok(ApiResponse::success(DrinksBody {
        drinks: vec![drink.long()],
    }))
}
