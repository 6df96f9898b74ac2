use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use serde_json::{json, Value};

/// Wrapper for API responses that adds `"success": true` to the body's
/// top-level fields
#[derive(Debug)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Create a successful API response (200 OK)
    pub fn success(data: T) -> Self {
        Self { data }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let data_value = match serde_json::to_value(&self.data) {
            Ok(value) => value,
            Err(e) => {
                tracing::error!("Failed to serialize response data: {}", e);
                return crate::error::ApiError::InternalServerError.into_response();
            }
        };

        // Body fields sit next to the success flag
        let envelope = match data_value {
            Value::Object(mut fields) => {
                fields.insert("success".to_string(), Value::Bool(true));
                Value::Object(fields)
            }
            other => json!({ "success": true, "data": other }),
        };

        (StatusCode::OK, Json(envelope)).into_response()
    }
}

// Convenience type aliases
pub type ApiResult<T> = Result<ApiResponse<T>, crate::error::ApiError>;
