//! `memory-relay`: WebSocket relay for multiplayer memory sessions.
//!
//! Environment:
//! - `PORT` (default 3000)
//! - `RELAY_BIND` (default 0.0.0.0)
//! - `RUST_LOG` (default `info`)

use std::sync::Arc;

use anyhow::Context;
use memory_match::relay::{self, RelayConfig, SessionRegistry};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = RelayConfig::from_env().context("reading relay configuration")?;
    let registry = Arc::new(SessionRegistry::new());

    relay::serve(config, registry, shutdown_signal())
        .await
        .with_context(|| format!("serving relay on {}", config.addr()))?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(%err, "cannot listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown requested");
}
