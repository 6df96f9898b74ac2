// HTTP API Error Types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::auth::AuthError;
use crate::database::DatabaseError;

/// HTTP API error. Every variant renders the
/// `{success: false, error: <status>, message}` envelope.
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request
    BadRequest,

    // 404 Not Found
    NotFound,

    // 405 Method Not Allowed
    MethodNotAllowed,

    // 422 Unprocessable Entity (request was understood but the store rejected it)
    UnprocessableEntity,

    // 500 Internal Server Error
    InternalServerError,

    // 503 Service Unavailable
    ServiceUnavailable,

    // 400/401/403/503 raised by the authorization guard
    Auth(AuthError),
}

impl ApiError {
    /// Get HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::UnprocessableEntity => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::InternalServerError => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Auth(err) => err.status(),
        }
    }

    /// Get client-safe error message
    pub fn message(&self) -> &str {
        match self {
            ApiError::BadRequest => "bad request",
            ApiError::NotFound => "resource not found",
            ApiError::MethodNotAllowed => "This method is not allowed",
            ApiError::UnprocessableEntity => "unprocessable",
            ApiError::InternalServerError => "internal server error",
            ApiError::ServiceUnavailable => "service unavailable",
            ApiError::Auth(err) => err.code(),
        }
    }

    /// Convert to JSON response body
    pub fn to_json(&self) -> Value {
        json!({
            "success": false,
            "error": self.status_code().as_u16(),
            "message": self.message()
        })
    }

    /// Store failure on a read endpoint. The cause is logged, the caller sees 404.
    pub fn read_failed(err: DatabaseError) -> Self {
        tracing::error!("Failed to read drinks: {}", err);
        ApiError::NotFound
    }

    /// Store failure on a mutation endpoint. The cause is logged, the caller sees 422.
    pub fn write_failed(err: DatabaseError) -> Self {
        match &err {
            DatabaseError::Constraint(msg) => tracing::warn!("Drink rejected by store: {}", msg),
            other => tracing::error!("Failed to write drink: {}", other),
        }
        ApiError::UnprocessableEntity
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        ApiError::Auth(err)
    }
}

// Standard error trait implementations
impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status_code(), Json(self.to_json())).into_response()
    }
}
