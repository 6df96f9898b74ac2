#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde_json::{json, Value};
use tower::ServiceExt;

use coffee_shop_api::auth::{Authenticator, Jwks, StaticJwks};
use coffee_shop_api::config::{AuthConfig, SecurityConfig};
use coffee_shop_api::database::{DrinkStore, MemoryDrinkStore};
use coffee_shop_api::AppState;

pub const DOMAIN: &str = "coffee-shop.test";
pub const AUDIENCE: &str = "drinks";
pub const KID: &str = "test-key-1";

const SIGNING_KEY: &str = include_str!("../fixtures/signing_key.pem");
const JWKS: &str = include_str!("../fixtures/jwks.json");

pub const ALL_PERMISSIONS: &[&str] = &[
    "get:drinks-detail",
    "post:drinks",
    "patch:drinks",
    "delete:drinks",
];

pub fn auth_config() -> AuthConfig {
    AuthConfig {
        domain: DOMAIN.to_string(),
        audience: AUDIENCE.to_string(),
        algorithms: vec!["RS256".to_string()],
        jwks_cache_ttl_secs: 3600,
    }
}

pub fn security_config() -> SecurityConfig {
    SecurityConfig {
        cors_origins: vec!["*".to_string()],
        max_request_size_bytes: 64 * 1024,
    }
}

/// Router wired to an in-memory store and the fixture signing key
pub struct TestApp {
    router: Router,
    pub store: Arc<MemoryDrinkStore>,
}

impl TestApp {
    pub fn new() -> Self {
        let store = Arc::new(MemoryDrinkStore::new());
        let jwks: Jwks = serde_json::from_str(JWKS).expect("fixture JWKS");
        let auth = Authenticator::new(&auth_config(), Arc::new(StaticJwks::new(jwks)))
            .expect("authenticator");

        let state = AppState::new(store.clone() as Arc<dyn DrinkStore>, Arc::new(auth));
        Self {
            router: coffee_shop_api::app(state, &security_config()),
            store,
        }
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        authorization: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(value) = authorization {
            builder = builder.header(header::AUTHORIZATION, value);
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("request");

        let response = self.router.clone().oneshot(request).await.expect("response");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body");
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("JSON body")
        };
        (status, json)
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.request(Method::GET, uri, token.map(bearer).as_deref(), None).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, uri, token.map(bearer).as_deref(), Some(body)).await
    }

    pub async fn patch(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.request(Method::PATCH, uri, token.map(bearer).as_deref(), Some(body)).await
    }

    pub async fn delete(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.request(Method::DELETE, uri, token.map(bearer).as_deref(), None).await
    }

    /// Create a drink through the API and return its long form
    pub async fn create_drink(&self, title: &str, recipe: Value) -> Value {
        let token = token(ALL_PERMISSIONS);
        let (status, body) = self
            .post("/drinks", Some(&token), json!({"title": title, "recipe": recipe}))
            .await;
        assert_eq!(status, StatusCode::OK, "create failed: {}", body);
        body["drinks"][0].clone()
    }
}

pub fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}

pub fn issuer() -> String {
    format!("https://{}/", DOMAIN)
}

/// Claims a valid token for this API would carry
pub fn claims(permissions: &[&str]) -> Value {
    let now = chrono::Utc::now().timestamp();
    json!({
        "sub": "auth0|barista",
        "iss": issuer(),
        "aud": AUDIENCE,
        "iat": now,
        "exp": now + 3600,
        "permissions": permissions,
    })
}

pub fn sign(claims: &Value, kid: Option<&str>) -> String {
    let mut header = Header::new(Algorithm::RS256);
    header.kid = kid.map(str::to_string);
    let key = EncodingKey::from_rsa_pem(SIGNING_KEY.as_bytes()).expect("fixture signing key");
    encode(&header, claims, &key).expect("sign token")
}

pub fn token(permissions: &[&str]) -> String {
    sign(&claims(permissions), Some(KID))
}

pub fn water_recipe() -> Value {
    json!([{"name": "water", "color": "blue", "parts": 1}])
}
