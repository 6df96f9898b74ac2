use axum::{http::StatusCode, response::{IntoResponse, Response}};

use crate::error::ApiError;

/// Unmatched routes get the JSON 404 envelope
pub async fn not_found() -> ApiError {
    ApiError::NotFound
}

/// axum answers a known path with the wrong method with an empty 405;
/// replace it with the JSON envelope
pub async fn json_method_not_allowed(response: Response) -> Response {
    if response.status() == StatusCode::METHOD_NOT_ALLOWED {
        return ApiError::MethodNotAllowed.into_response();
    }
    response
}
