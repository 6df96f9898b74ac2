use anyhow::Context;
use clap::Args;

use crate::cli::{build_state, BackendArgs};
use crate::config::AppConfig;

#[derive(Args, Debug)]
pub struct ServeArgs {
    #[arg(long, help = "Port to listen on (overrides PORT)")]
    pub port: Option<u16>,

    #[arg(long, help = "Drop all drinks and seed the sample drink before serving")]
    pub reset_db: bool,
}

pub async fn handle(args: ServeArgs, backend: &BackendArgs, mut config: AppConfig) -> anyhow::Result<()> {
    if let Some(port) = args.port {
        config.server.port = port;
    }

    let state = build_state(backend, &config).await?;
    if args.reset_db {
        state.store.reset().await.context("failed to reset drinks")?;
    }

    let app = crate::app(state, &config.security);

    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Coffee shop API listening on http://{}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
