//! Structured logging setup shared by both binaries.
//!
//! `RUST_LOG` wins when set. Otherwise the level from `[logging]` in
//! hub.toml applies to this crate and to tower-http's request traces.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub fn init(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_directives(level).into());

    // a second init (e.g. from tests) is not an error worth dying over
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}

fn default_directives(level: &str) -> String {
    format!("sensor_hub={level},feeder={level},tower_http={level}")
}
