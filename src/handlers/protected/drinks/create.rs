// handlers/protected/drinks/create.rs - POST /drinks handler

use axum::{
    extract::{rejection::JsonRejection, State},
    http::HeaderMap,
    Json,
};
use tracing::info;

use crate::auth::permissions;
use crate::database::models::Drink;
use crate::error::ApiError;
use crate::handlers::{reject_body, DrinkPayload, DrinksBody};
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

/// POST /drinks - create a drink from `{title, recipe}`.
///
/// The body is checked before the credential, so a request without a title
/// or recipe is a 400 whatever token it carries. Requires `post:drinks`.
pub async fn create(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Json<DrinkPayload>, JsonRejection>,
) -> ApiResult<DrinksBody<Drink>> {
    let Json(payload) = body.map_err(reject_body)?;
    let new_drink = payload.into_new_drink()?;

    let claims = state
        .auth
        .requires_auth(&headers, permissions::POST_DRINKS)
        .await?;

    let drink = state
        .store
        .insert(new_drink)
        .await
        .map_err(ApiError::write_failed)?;

    info!(drink_id = drink.id, sub = ?claims.sub, "Created drink");
    Ok(ApiResponse::success(DrinksBody {
        drinks: vec![drink.long()],
    }))
}
