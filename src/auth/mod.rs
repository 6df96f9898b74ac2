pub mod guard;
pub mod jwks;

use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use guard::{bearer_token, check_permissions, Authenticator};
pub use jwks::{Jwk, Jwks, KeySource, RemoteJwks, StaticJwks};

/// Permission names checked by the drink endpoints
pub mod permissions {
    pub const GET_DRINKS_DETAIL: &str = "get:drinks-detail";
    pub const POST_DRINKS: &str = "post:drinks";
    pub const PATCH_DRINKS: &str = "patch:drinks";
    pub const DELETE_DRINKS: &str = "delete:drinks";
}

/// Decoded payload of a verified access token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Option<String>,
    pub iss: Option<String>,
    /// A single audience string or a list of them
    pub aud: Option<serde_json::Value>,
    pub exp: i64,
    pub iat: Option<i64>,
    pub permissions: Option<Vec<String>>,
}

/// Authorization failure. `code` is returned to the caller as the message,
/// `description` is only logged.
#[derive(Debug, Clone, Error)]
#[error("{code}: {description}")]
pub struct AuthError {
    status: StatusCode,
    code: &'static str,
    description: String,
}

impl AuthError {
    pub fn new(status: StatusCode, code: &'static str, description: impl Into<String>) -> Self {
        Self {
            status,
            code,
            description: description.into(),
        }
    }

    pub fn header_missing() -> Self {
        Self::new(
            StatusCode::UNAUTHORIZED,
            "authorization_header_missing",
            "Authorization header is expected.",
        )
    }

    pub fn invalid_header(status: StatusCode, description: impl Into<String>) -> Self {
        Self::new(status, "invalid_header", description)
    }

    pub fn invalid_claims(status: StatusCode, description: impl Into<String>) -> Self {
        Self::new(status, "invalid_claims", description)
    }

    pub fn token_expired() -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "token_expired", "Token expired.")
    }

    pub fn unauthorized(permission: &str) -> Self {
        Self::new(
            StatusCode::FORBIDDEN,
            "unauthorized",
            format!("Permission '{}' not found.", permission),
        )
    }

    pub fn keys_unavailable(description: impl Into<String>) -> Self {
        Self::new(StatusCode::SERVICE_UNAVAILABLE, "signing_keys_unavailable", description)
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn code(&self) -> &'static str {
        self.code
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}
