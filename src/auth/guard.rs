use std::str::FromStr;
use std::sync::Arc;

use axum::http::{header::AUTHORIZATION, HeaderMap, StatusCode};
use jsonwebtoken::{decode, decode_header, errors::ErrorKind, Algorithm, DecodingKey, Validation};
use tracing::{debug, warn};

use super::jwks::KeySource;
use super::{AuthError, Claims};
use crate::config::AuthConfig;

/// Verifies bearer credentials against the issuer's published keys and
/// checks permissions. Built once at startup and shared through `AppState`.
pub struct Authenticator {
    keys: Arc<dyn KeySource>,
    validation: Validation,
}

impl Authenticator {
    pub fn new(config: &AuthConfig, keys: Arc<dyn KeySource>) -> anyhow::Result<Self> {
        let algorithms = config
            .algorithms
            .iter()
            .map(|a| Algorithm::from_str(a).map_err(|_| anyhow::anyhow!("unsupported algorithm '{}'", a)))
            .collect::<anyhow::Result<Vec<_>>>()?;
        let first = *algorithms
            .first()
            .ok_or_else(|| anyhow::anyhow!("at least one signing algorithm must be configured"))?;

        let mut validation = Validation::new(first);
        validation.algorithms = algorithms;
        validation.set_audience(&[&config.audience]);
        validation.set_issuer(&[config.issuer()]);
        validation.set_required_spec_claims(&["exp", "aud", "iss"]);

        Ok(Self { keys, validation })
    }

    /// Guard for protected handlers: authenticates the request and requires
    /// `permission`. The returned claims are available to the handler.
    pub async fn requires_auth(
        &self,
        headers: &HeaderMap,
        permission: &str,
    ) -> Result<Claims, AuthError> {
        let result = self.authorize(headers, permission).await;

        match &result {
            Ok(claims) => debug!(permission, sub = ?claims.sub, "Request authorized"),
            Err(err) => warn!(
                permission,
                status = err.status().as_u16(),
                code = err.code(),
                "Authorization failed: {}",
                err.description()
            ),
        }
        result
    }

    async fn authorize(&self, headers: &HeaderMap, permission: &str) -> Result<Claims, AuthError> {
        let token = bearer_token(headers)?;
        let claims = self.verify_decode(token).await?;
        check_permissions(permission, &claims)?;
        Ok(claims)
    }

    /// Verify the token signature and standard claims, then decode the payload
    pub async fn verify_decode(&self, token: &str) -> Result<Claims, AuthError> {
        let header = decode_header(token).map_err(|_| {
            AuthError::invalid_header(StatusCode::BAD_REQUEST, "Unable to parse authentication token.")
        })?;
        let kid = header.kid.ok_or_else(|| {
            AuthError::invalid_header(StatusCode::UNAUTHORIZED, "Authorization malformed.")
        })?;

        let key = self.decoding_key(&kid).await?;

        decode::<Claims>(token, &key, &self.validation)
            .map(|data| data.claims)
            .map_err(classify)
    }

    async fn decoding_key(&self, kid: &str) -> Result<DecodingKey, AuthError> {
        let unavailable = |e: anyhow::Error| AuthError::keys_unavailable(format!("{:#}", e));

        let jwks = self.keys.keys().await.map_err(unavailable)?;
        let jwk = match jwks.find(kid) {
            Some(jwk) => jwk.clone(),
            None => {
                debug!(kid, "Key id not in cached key set, refreshing");
                let refreshed = self.keys.refresh().await.map_err(unavailable)?;
                refreshed.find(kid).cloned().ok_or_else(|| {
                    AuthError::invalid_header(StatusCode::BAD_REQUEST, "Unable to find the appropriate key.")
                })?
            }
        };

        jwk.decoding_key().map_err(|_| {
            AuthError::invalid_header(StatusCode::BAD_REQUEST, "Unable to use the published key.")
        })
    }
}

fn classify(err: jsonwebtoken::errors::Error) -> AuthError {
    match err.kind() {
        ErrorKind::ExpiredSignature => AuthError::token_expired(),
        ErrorKind::InvalidAudience | ErrorKind::InvalidIssuer | ErrorKind::MissingRequiredClaim(_) => {
            AuthError::invalid_claims(
                StatusCode::UNAUTHORIZED,
                "Incorrect claims. Please, check the audience and issuer.",
            )
        }
        ErrorKind::Json(_) => AuthError::invalid_claims(
            StatusCode::BAD_REQUEST,
            "Token payload does not have the expected shape.",
        ),
        _ => AuthError::invalid_header(StatusCode::BAD_REQUEST, "Unable to parse authentication token."),
    }
}

/// Extract the credential from `Authorization: Bearer <token>`
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let value = headers.get(AUTHORIZATION).ok_or_else(AuthError::header_missing)?;

    let value = value.to_str().map_err(|_| {
        AuthError::invalid_header(StatusCode::UNAUTHORIZED, "Authorization header is not valid text.")
    })?;

    let parts: Vec<&str> = value.split_whitespace().collect();
    match parts.as_slice() {
        [scheme, token] if scheme.eq_ignore_ascii_case("bearer") => Ok(*token),
        [scheme, ..] if !scheme.eq_ignore_ascii_case("bearer") => Err(AuthError::invalid_header(
            StatusCode::UNAUTHORIZED,
            "Authorization header must start with \"Bearer\".",
        )),
        [_] => Err(AuthError::invalid_header(StatusCode::UNAUTHORIZED, "Token not found.")),
        _ => Err(AuthError::invalid_header(
            StatusCode::UNAUTHORIZED,
            "Authorization header must be bearer token.",
        )),
    }
}

pub fn check_permissions(permission: &str, claims: &Claims) -> Result<(), AuthError> {
    let granted = claims.permissions.as_ref().ok_or_else(|| {
        AuthError::invalid_claims(StatusCode::BAD_REQUEST, "Permissions not included in JWT.")
    })?;

    if !granted.iter().any(|p| p == permission) {
        return Err(AuthError::unauthorized(permission));
    }
    Ok(())
}
