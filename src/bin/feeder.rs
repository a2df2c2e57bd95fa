//! feeder - posts random sensor readings to a running hub.
//!
//!     feeder                          # forever, every 5-15s, to hub.toml's hub_url
//!     feeder --count 20 --hub-url http://pi.local:8080/api/sensor

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

use sensor_hub::config::HubConfig;
use sensor_hub::feeder::Feeder;
use sensor_hub::logging;

#[derive(Parser)]
#[command(name = "feeder", about = "Simulated sensor node for sensor-hub", version)]
struct Cli {
    /// Path to hub.toml (default: config/hub.toml, then ../config/hub.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override feeder.hub_url
    #[arg(long)]
    hub_url: Option<String>,

    /// Stop after this many posts
    #[arg(long)]
    count: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = HubConfig::resolve(cli.config.as_deref())?;
    logging::init(&config.logging.level);

    let mut feeder_config = config.feeder;
    if let Some(hub_url) = cli.hub_url {
        feeder_config.hub_url = hub_url;
    }
    info!(
        hub_url = %feeder_config.hub_url,
        min_interval_seconds = feeder_config.min_interval_seconds,
        max_interval_seconds = feeder_config.max_interval_seconds,
        "feeder starting"
    );

    Feeder::new(&feeder_config).run(cli.count).await
}
