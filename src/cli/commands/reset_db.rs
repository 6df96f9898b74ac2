use anyhow::Context;

use crate::cli::{build_store, BackendArgs};
use crate::config::AppConfig;

/// Drop and recreate the drinks table, then seed the sample drink
pub async fn handle(backend: &BackendArgs, config: &AppConfig) -> anyhow::Result<()> {
    let store = build_store(backend, config).await?;
    store.reset().await.context("failed to reset drinks")?;

    let drinks = store.list_all().await?;
    println!("Reset drinks table ({} drink seeded)", drinks.len());
    Ok(())
}
