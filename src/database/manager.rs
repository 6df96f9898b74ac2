use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;
use thiserror::Error;
use tracing::info;

use crate::config::DatabaseConfig;

/// Errors raised by the persistence layer
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Missing configuration: {0}")]
    ConfigMissing(&'static str),

    #[error("Invalid database URL")]
    InvalidDatabaseUrl,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Constraint violated: {0}")]
    Constraint(String),

    #[error("Stored recipe is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),

    #[error(transparent)]
    Sqlx(sqlx::Error),
}

// Postgres SQLSTATE codes that mean the row itself was rejected
const NOT_NULL_VIOLATION: &str = "23502";
const STRING_DATA_RIGHT_TRUNCATION: &str = "22001";

impl From<sqlx::Error> for DatabaseError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            let code = db_err.code();
            if db_err.is_unique_violation()
                || matches!(code.as_deref(), Some(NOT_NULL_VIOLATION | STRING_DATA_RIGHT_TRUNCATION))
            {
                return DatabaseError::Constraint(db_err.message().to_string());
            }
        }
        DatabaseError::Sqlx(err)
    }
}

/// Builds the Postgres pool backing the drink store
pub struct DatabaseManager;

impl DatabaseManager {
    /// Connect a pool using `DatabaseConfig`
    pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, DatabaseError> {
        let connection_string = Self::build_connection_string(config)?;

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout))
            .connect(&connection_string)
            .await?;

        info!(max_connections = config.max_connections, "Created database pool");
        Ok(pool)
    }

    fn build_connection_string(config: &DatabaseConfig) -> Result<String, DatabaseError> {
        let base = config
            .url
            .as_deref()
            .ok_or(DatabaseError::ConfigMissing("DATABASE_URL"))?;

        let url = url::Url::parse(base).map_err(|_| DatabaseError::InvalidDatabaseUrl)?;
        if !matches!(url.scheme(), "postgres" | "postgresql") {
            return Err(DatabaseError::InvalidDatabaseUrl);
        }
        Ok(url.into())
    }
}
