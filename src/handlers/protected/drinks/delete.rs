// handlers/protected/drinks/delete.rs - DELETE /drinks/:id handler

use axum::{
    extract::{Path, State},
    http::HeaderMap,
};
use tracing::info;

use crate::auth::permissions;
use crate::error::ApiError;
use crate::handlers::{parse_drink_id, DeletedBody};
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

/// DELETE /drinks/:id - remove a drink. Requires `delete:drinks`.
/// The drink is looked up first so an unknown id is a 404, not a store error.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> ApiResult<DeletedBody> {
    let claims = state
        .auth
        .requires_auth(&headers, permissions::DELETE_DRINKS)
        .await?;

    let id = parse_drink_id(&id)?;
    let drink = state
        .store
        .find_by_id(id)
        .await
        .map_err(ApiError::write_failed)?
        .ok_or(ApiError::NotFound)?;

    state
        .store
        .delete(&drink)
        .await
        .map_err(ApiError::write_failed)?;

    info!(drink_id = drink.id, sub = ?claims.sub, "Deleted drink");
    Ok(ApiResponse::success(DeletedBody { delete: drink.id }))
}
