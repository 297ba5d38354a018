//! # globo-skilld: Globo smart-home skill daemon
//!
//! Composition root that wires all adapters together and starts the server.
//!
//! ## Responsibilities
//! - Load configuration (`globo-skill.toml`, env vars)
//! - Initialize `tracing` with an `EnvFilter`
//! - Optionally serve the virtual Globo bridge on its own listener
//! - Construct the reqwest bridge client and the directive router
//! - Build the axum router, bind to a TCP port and serve
//! - Handle graceful shutdown (Ctrl-C)
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer; no domain logic belongs here.

mod config;

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use globo_skill_adapter_bridge_reqwest::ReqwestBridgeClient;
use globo_skill_adapter_http_axum::state::AppState;
use globo_skill_adapter_virtual_bridge::VirtualBridge;
use globo_skill_app::services::directive_router::DirectiveRouter;

use crate::config::Config;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&config.logging.filter)?)
        .init();

    if config.virtual_bridge.enabled {
        spawn_virtual_bridge(&config).await?;
    }

    let bridge_config = config.bridge_config();
    tracing::info!(bridge = ?bridge_config, "bridge configured");
    let bridge = ReqwestBridgeClient::new(&bridge_config)?;

    let state = AppState::new(DirectiveRouter::new(bridge));
    let app = globo_skill_adapter_http_axum::router::build(state);

    let bind_addr = config.bind_addr();
    let listener = TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "globo-skilld listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("globo-skilld stopped");
    Ok(())
}

async fn spawn_virtual_bridge(config: &Config) -> Result<(), std::io::Error> {
    let bridge = Arc::new(VirtualBridge::new(config.virtual_bridge.credentials()));
    let app = globo_skill_adapter_virtual_bridge::router::build(bridge);

    let bind_addr = config.virtual_bridge.bind_addr();
    let listener = TcpListener::bind(&bind_addr).await?;
    tracing::info!(addr = %bind_addr, "virtual globo bridge listening");

    tokio::spawn(async move {
        if let Err(err) = axum::serve(listener, app).await {
            tracing::error!(error = %err, "virtual globo bridge stopped");
        }
    });
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown requested");
}
