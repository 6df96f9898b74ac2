//! Published signing keys (JWKS) of the token issuer.
//!
//! `RemoteJwks` fetches `https://<domain>/.well-known/jwks.json` and keeps the
//! set in memory for a configurable TTL. Only keys are cached, never the
//! outcome of verifying a token.

use anyhow::Context;
use async_trait::async_trait;
use jsonwebtoken::{errors::ErrorKind, DecodingKey};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

/// JSON Web Key Set.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Jwks {
    pub keys: Vec<Jwk>,
}

/// A single JSON Web Key. Only RSA keys are used for verification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Jwk {
    pub kty: String,
    pub kid: Option<String>,
    #[serde(rename = "use")]
    pub key_use: Option<String>,
    pub alg: Option<String>,
    pub n: Option<String>,
    pub e: Option<String>,
}

impl Jwks {
    pub fn find(&self, kid: &str) -> Option<&Jwk> {
        self.keys.iter().find(|k| k.kid.as_deref() == Some(kid))
    }
}

impl Jwk {
    pub fn decoding_key(&self) -> Result<DecodingKey, jsonwebtoken::errors::Error> {
        match (self.kty.as_str(), &self.n, &self.e) {
            ("RSA", Some(n), Some(e)) => DecodingKey::from_rsa_components(n, e),
            _ => Err(ErrorKind::InvalidKeyFormat.into()),
        }
    }
}

/// Where the authenticator gets its verification keys from.
#[async_trait]
pub trait KeySource: Send + Sync {
    async fn keys(&self) -> anyhow::Result<Arc<Jwks>>;

    /// Called when a token names a key id the current set does not contain
    async fn refresh(&self) -> anyhow::Result<Arc<Jwks>> {
        self.keys().await
    }
}

/// Fixed key set, loaded once
pub struct StaticJwks {
    jwks: Arc<Jwks>,
}

impl StaticJwks {
    pub fn new(jwks: Jwks) -> Self {
        Self { jwks: Arc::new(jwks) }
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read JWKS file {}", path.display()))?;
        let jwks: Jwks = serde_json::from_str(&text)
            .with_context(|| format!("invalid JWKS in {}", path.display()))?;
        Ok(Self::new(jwks))
    }
}

#[async_trait]
impl KeySource for StaticJwks {
    async fn keys(&self) -> anyhow::Result<Arc<Jwks>> {
        Ok(self.jwks.clone())
    }
}

struct CachedJwks {
    jwks: Arc<Jwks>,
    fetched_at: Instant,
}

const DEFAULT_MIN_REFRESH_INTERVAL: Duration = Duration::from_secs(30);

/// Key set fetched over HTTPS from the issuer
pub struct RemoteJwks {
    url: url::Url,
    client: reqwest::Client,
    ttl: Duration,
    min_refresh_interval: Duration,
    cache: RwLock<Option<CachedJwks>>,
}

impl RemoteJwks {
    pub fn new(url: url::Url, ttl: Duration) -> Self {
        Self {
            url,
            client: reqwest::Client::new(),
            ttl,
            min_refresh_interval: DEFAULT_MIN_REFRESH_INTERVAL,
            cache: RwLock::new(None),
        }
    }

    /// Lower bound between forced refreshes, so unknown key ids cannot
    /// make every request hit the issuer
    pub fn with_min_refresh_interval(mut self, interval: Duration) -> Self {
        self.min_refresh_interval = interval;
        self
    }

    async fn cached(&self, max_age: Duration) -> Option<Arc<Jwks>> {
        let cache = self.cache.read().await;
        cache
            .as_ref()
            .filter(|c| c.fetched_at.elapsed() < max_age)
            .map(|c| c.jwks.clone())
    }

    async fn fetch(&self) -> anyhow::Result<Arc<Jwks>> {
        tracing::info!(jwks_url = %self.url, "Fetching JWKS keys");
        let jwks: Jwks = self
            .client
            .get(self.url.clone())
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
            .context("invalid JWKS document")?;

        let jwks = Arc::new(jwks);
        *self.cache.write().await = Some(CachedJwks {
            jwks: jwks.clone(),
            fetched_at: Instant::now(),
        });
        Ok(jwks)
    }
}

#[async_trait]
impl KeySource for RemoteJwks {
    async fn keys(&self) -> anyhow::Result<Arc<Jwks>> {
        if let Some(jwks) = self.cached(self.ttl).await {
            return Ok(jwks);
        }
        self.fetch().await
    }

    async fn refresh(&self) -> anyhow::Result<Arc<Jwks>> {
        if let Some(jwks) = self.cached(self.min_refresh_interval).await {
            return Ok(jwks);
        }
        self.fetch().await
    }
}
