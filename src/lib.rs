pub mod auth;
pub mod cli;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod state;

use axum::{
    extract::{DefaultBodyLimit, State},
    http::{header, HeaderValue, Method},
    routing::{get, patch},
    Router,
};
use serde_json::{json, Value};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::config::SecurityConfig;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
pub use crate::state::AppState;

/// Build the HTTP application around an already-constructed state
pub fn app(state: AppState, security: &SecurityConfig) -> Router {
    Router::new()
        // Public
        .route("/health", get(health))
        .merge(drink_routes())
        .fallback(middleware::not_found)
        .with_state(state)
        // Global middleware
        .layer(axum::middleware::map_response(middleware::json_method_not_allowed))
        .layer(DefaultBodyLimit::max(security.max_request_size_bytes))
        .layer(cors_layer(security))
        .layer(TraceLayer::new_for_http())
}

fn drink_routes() -> Router<AppState> {
    use handlers::{protected, public};

    Router::new()
        .route(
            "/drinks",
            get(public::drinks_list).post(protected::drinks_create),
        )
        .route("/drinks-detail", get(protected::drinks_detail))
        .route(
            "/drinks/:id",
            patch(protected::drinks_update).delete(protected::drinks_delete),
        )
}

fn cors_layer(security: &SecurityConfig) -> CorsLayer {
    let origins = if security.cors_origins.iter().any(|o| o == "*") {
        AllowOrigin::any()
    } else {
        let parsed: Vec<HeaderValue> = security
            .cors_origins
            .iter()
            .filter_map(|origin| match HeaderValue::from_str(origin) {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                    None
                }
            })
            .collect();
        AllowOrigin::list(parsed)
    };

    CorsLayer::new()
        .allow_origin(origins)
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
}

async fn health(State(state): State<AppState>) -> ApiResult<Value> {
    state.store.ping().await.map_err(|e| {
        tracing::error!("Health check failed: {}", e);
        ApiError::ServiceUnavailable
    })?;

    Ok(ApiResponse::success(json!({
        "data": {
            "status": "ok",
            "timestamp": chrono::Utc::now(),
            "database": "ok"
        }
    })))
}
