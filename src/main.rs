//! ==============================================================================
//! main.rs - sensor hub entry point
//! ==============================================================================
//!
//! purpose:
//!     this is the "hub" that sensor nodes push readings to.
//!
//! responsibilities:
//!     - load configuration (hub.toml or defaults)
//!     - initialize structured logging
//!     - build the one Store that owns the backing file
//!     - serve the /api routes until ctrl-c
//!
//! relationships:
//!     - uses: config.rs, logging.rs, store.rs, api.rs
//!     - fed by: bin/feeder.rs (or real nodes posting to /api/sensor)
//!
//! architecture:
//!
//!     ┌──────────────┐   POST /api/sensor   ┌──────────────────────────────┐
//!     │ sensor nodes │ ───────────────────▶ │  axum router (api.rs)        │
//!     │  / feeder    │                      │        │                     │
//!     └──────────────┘   GET  /api/...      │  ┌─────┴─────┐               │
//!     ┌──────────────┐ ◀─────────────────── │  │   store   │ <- store.rs   │
//!     │  dashboards  │                      │  └─────┬─────┘               │
//!     └──────────────┘                      └────────┼─────────────────────┘
//!                                                    │ one lock, whole file
//!                                             sensordata.json
//!
//! ==============================================================================

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

use sensor_hub::api::{self, AppState};
use sensor_hub::config::HubConfig;
use sensor_hub::logging;
use sensor_hub::store::Store;

#[derive(Parser)]
#[command(name = "sensor-hub", about = "Store sensor readings and serve them over HTTP", version)]
struct Cli {
    /// Path to hub.toml (default: config/hub.toml, then ../config/hub.toml)
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // step 1: load configuration
    let config = HubConfig::resolve(cli.config.as_deref())?;

    // step 2: logging
    logging::init(&config.logging.level);
    info!("sensor-hub v{} starting", env!("CARGO_PKG_VERSION"));
    config.log_summary();

    // step 3: the store, shared by every handler
    let store = Store::new(config.storage.data_file.clone());
    let app = api::router(AppState::new(store, config.logging.show_sensor_data));

    // step 4: serve
    let listener = tokio::net::TcpListener::bind(&config.server.bind_address)
        .await
        .with_context(|| format!("failed to bind {}", config.server.bind_address))?;
    info!(address = %listener.local_addr()?, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    info!("ctrl-c received, draining connections");
}
