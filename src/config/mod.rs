use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: Option<String>,
    pub max_connections: u32,
    pub connection_timeout: u64,
}

/// Signing authority settings used to verify bearer credentials.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Tenant domain of the identity provider, e.g. `example.us.auth0.com`
    pub domain: String,
    /// Expected `aud` claim
    pub audience: String,
    pub algorithms: Vec<String>,
    pub jwks_cache_ttl_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    pub cors_origins: Vec<String>,
    pub max_request_size_bytes: usize,
}

impl AuthConfig {
    /// Expected `iss` claim. Auth0 issues tokens with a trailing slash.
    pub fn issuer(&self) -> String {
        format!("https://{}/", self.domain.trim_end_matches('/'))
    }

    pub fn jwks_url(&self) -> Result<url::Url, url::ParseError> {
        url::Url::parse(&self.issuer())?.join(".well-known/jwks.json")
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        // Server overrides
        if let Ok(v) = env::var("SERVER_HOST") {
            self.server.host = v;
        }
        if let Some(port) = env::var("SERVER_PORT")
            .ok()
            .or_else(|| env::var("PORT").ok())
            .and_then(|s| s.parse::<u16>().ok())
        {
            self.server.port = port;
        }

        // Database overrides
        if let Ok(v) = env::var("DATABASE_URL") {
            self.database.url = Some(v);
        }
        if let Ok(v) = env::var("DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = v.parse().unwrap_or(self.database.max_connections);
        }
        if let Ok(v) = env::var("DATABASE_CONNECTION_TIMEOUT") {
            self.database.connection_timeout = v.parse().unwrap_or(self.database.connection_timeout);
        }

        // Auth overrides
        if let Ok(v) = env::var("AUTH0_DOMAIN") {
            self.auth.domain = v;
        }
        if let Ok(v) = env::var("API_AUDIENCE") {
            self.auth.audience = v;
        }
        if let Ok(v) = env::var("AUTH_ALGORITHMS") {
            self.auth.algorithms = split_list(&v);
        }
        if let Ok(v) = env::var("AUTH_JWKS_CACHE_TTL_SECS") {
            self.auth.jwks_cache_ttl_secs = v.parse().unwrap_or(self.auth.jwks_cache_ttl_secs);
        }

        // Security overrides
        if let Ok(v) = env::var("SECURITY_CORS_ORIGINS") {
            self.security.cors_origins = split_list(&v);
        }
        if let Ok(v) = env::var("SECURITY_MAX_REQUEST_SIZE_BYTES") {
            self.security.max_request_size_bytes = v.parse().unwrap_or(self.security.max_request_size_bytes);
        }

        self
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 5000,
            },
            database: DatabaseConfig {
                url: None,
                max_connections: 5,
                connection_timeout: 30,
            },
            auth: AuthConfig {
                domain: "coffee-shop.us.auth0.com".to_string(),
                audience: "drinks".to_string(),
                algorithms: vec!["RS256".to_string()],
                jwks_cache_ttl_secs: 60 * 60,
            },
            security: SecurityConfig {
                cors_origins: vec!["*".to_string()],
                max_request_size_bytes: 1024 * 1024, // 1MB
            },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            database: DatabaseConfig {
                url: None,
                max_connections: 10,
                connection_timeout: 10,
            },
            security: SecurityConfig {
                cors_origins: vec!["https://staging.example.com".to_string()],
                max_request_size_bytes: 256 * 1024,
            },
            ..Self::development()
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            database: DatabaseConfig {
                url: None,
                max_connections: 20,
                connection_timeout: 5,
            },
            security: SecurityConfig {
                cors_origins: vec!["https://app.example.com".to_string()],
                max_request_size_bytes: 64 * 1024,
            },
            ..Self::development()
        }
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
