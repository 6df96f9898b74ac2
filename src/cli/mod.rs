pub mod commands;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};

use crate::auth::{Authenticator, KeySource, RemoteJwks, StaticJwks};
use crate::config::AppConfig;
use crate::database::{DatabaseManager, DrinkStore, MemoryDrinkStore, PgDrinkStore};
use crate::state::AppState;

#[derive(Parser)]
#[command(name = "coffee-shop")]
#[command(about = "Coffee shop drinks API server")]
#[command(version)]
pub struct Cli {
    #[command(flatten)]
    pub backend: BackendArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Where drinks and signing keys come from
#[derive(Args, Debug, Clone)]
pub struct BackendArgs {
    #[arg(long, global = true, help = "Keep drinks in process memory instead of Postgres")]
    pub in_memory: bool,

    #[arg(
        long,
        global = true,
        value_name = "PATH",
        help = "Load signing keys from a JWKS file instead of the issuer"
    )]
    pub jwks_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Run the HTTP API")]
    Serve(commands::serve::ServeArgs),

    #[command(about = "Drop and recreate the drinks table, seeding one sample drink")]
    ResetDb,
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = AppConfig::from_env();
    tracing::info!("Starting coffee shop API in {:?} mode", config.environment);

    match cli.command {
        Commands::Serve(args) => commands::serve::handle(args, &cli.backend, config).await,
        Commands::ResetDb => commands::reset_db::handle(&cli.backend, &config).await,
    }
}

/// Open the configured drink store
pub async fn build_store(
    backend: &BackendArgs,
    config: &AppConfig,
) -> anyhow::Result<Arc<dyn DrinkStore>> {
    if backend.in_memory {
        tracing::warn!("Using in-memory drink store; data is lost on exit");
        return Ok(Arc::new(MemoryDrinkStore::new()));
    }

    let pool = DatabaseManager::connect(&config.database)
        .await
        .context("failed to connect to database")?;
    let store = PgDrinkStore::new(pool);
    store.ensure_schema().await.context("failed to create drinks table")?;
    Ok(Arc::new(store))
}

/// Build the authenticator with either a local or a remote key set
pub fn build_authenticator(
    backend: &BackendArgs,
    config: &AppConfig,
) -> anyhow::Result<Arc<Authenticator>> {
    let keys: Arc<dyn KeySource> = match &backend.jwks_file {
        Some(path) => Arc::new(StaticJwks::from_file(path)?),
        None => {
            let url = config
                .auth
                .jwks_url()
                .with_context(|| format!("invalid auth domain '{}'", config.auth.domain))?;
            Arc::new(RemoteJwks::new(
                url,
                Duration::from_secs(config.auth.jwks_cache_ttl_secs),
            ))
        }
    };

    Ok(Arc::new(Authenticator::new(&config.auth, keys)?))
}

pub async fn build_state(backend: &BackendArgs, config: &AppConfig) -> anyhow::Result<AppState> {
    let store = build_store(backend, config).await?;
    let auth = build_authenticator(backend, config)?;
    Ok(AppState::new(store, auth))
}
