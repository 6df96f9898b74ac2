// handlers/public/drinks.rs - GET /drinks handler

use axum::extract::State;

use crate::database::models::DrinkShort;
use crate::error::ApiError;
use crate::handlers::DrinksBody;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

/// GET /drinks - every drink in the short representation.
/// Any store failure is reported as 404.
pub async fn list(State(state): State<AppState>) -> ApiResult<DrinksBody<DrinkShort>> {
    let drinks = state.store.list_all().await.map_err(ApiError::read_failed)?;

    Ok(ApiResponse::success(DrinksBody {
        drinks: drinks.iter().map(|d| d.short()).collect(),
    }))
}
