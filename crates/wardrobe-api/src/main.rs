//! Binary entrypoint for the Wardrobe API server.
use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wardrobe_api::{run, AppState};
use wardrobe_pipeline::{OutfitGenerator, PipelineConfig};
use wardrobe_rules::RuleTables;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut config = match std::env::var("WARDROBE_CONFIG") {
        Ok(path) => PipelineConfig::load(&path).with_context(|| format!("loading pipeline config {}", path))?,
        Err(_) => PipelineConfig::default(),
    };
    config.apply_env().context("applying WARDROBE_* overrides")?;

    let tables = match std::env::var("WARDROBE_RULES") {
        Ok(path) => Arc::new(RuleTables::load(&path).with_context(|| format!("loading rule tables {}", path))?),
        Err(_) => RuleTables::shared(),
    };
    tracing::info!(rules = %tables.version, occasions = tables.occasions.len(), "rule tables loaded");

    let generator = OutfitGenerator::new(tables, config)?;
    let state = AppState::new(generator)?;

    // Default listen address can be overridden with WARDROBE_ADDR
    let addr = std::env::var("WARDROBE_ADDR").unwrap_or_else(|_| "0.0.0.0:8787".to_string());
    run(&addr, state).await
}
