// handlers/protected/drinks/detail.rs - GET /drinks-detail handler

use axum::{extract::State, http::HeaderMap};

use crate::auth::permissions;
use crate::database::models::Drink;
use crate::error::ApiError;
use crate::handlers::DrinksBody;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

/// GET /drinks-detail - every drink in the long representation.
/// Requires `get:drinks-detail`; an empty menu is a 404.
pub async fn detail(State(state): State<AppState>, headers: HeaderMap) -> ApiResult<DrinksBody<Drink>> {
    state
        .auth
        .requires_auth(&headers, permissions::GET_DRINKS_DETAIL)
        .await?;

    let drinks = state.store.list_all().await.map_err(ApiError::read_failed)?;
    if drinks.is_empty() {
        return Err(ApiError::NotFound);
    }

    Ok(ApiResponse::success(DrinksBody {
        drinks: drinks.iter().map(Drink::long).collect(),
    }))
}
