//! ==============================================================================
//! config.rs - Runtime Configuration Loader
//! ==============================================================================
//!
//! purpose:
//!     defines the schema for `hub.toml`.
//!     loads configuration from file or falls back to defaults.
//!
//! structure:
//!     - ServerConfig: Where the HTTP API listens.
//!     - StorageConfig: Path of the JSON backing file.
//!     - LoggingConfig: Log level and whether to echo each received reading.
//!     - FeederConfig: Where the simulated sensor node posts, and how often.
//!
//! every section (and every field) is optional; missing values take the
//! defaults below.
//!
//! ==============================================================================

use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Root configuration structure
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct HubConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
    pub feeder: FeederConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_address: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct StorageConfig {
    pub data_file: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub show_sensor_data: bool,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct FeederConfig {
    pub hub_url: String,
    pub min_interval_seconds: u64,
    pub max_interval_seconds: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { bind_address: "0.0.0.0:8080".to_string() }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self { data_file: PathBuf::from("sensordata.json") }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_string(), show_sensor_data: true }
    }
}

impl Default for FeederConfig {
    fn default() -> Self {
        Self {
            hub_url: "http://localhost:8080/api/sensor".to_string(),
            min_interval_seconds: 5,
            max_interval_seconds: 15,
        }
    }
}

impl HubConfig {
    /// Load configuration from file
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| anyhow::anyhow!("Failed to read config file: {}", e))?;

        Self::parse(&content)
    }

    /// Parse configuration from a TOML string
    pub fn parse(content: &str) -> anyhow::Result<Self> {
        let config: HubConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config: {}", e))?;

        if config.feeder.min_interval_seconds > config.feeder.max_interval_seconds {
            anyhow::bail!(
                "feeder.min_interval_seconds ({}) is greater than feeder.max_interval_seconds ({})",
                config.feeder.min_interval_seconds,
                config.feeder.max_interval_seconds
            );
        }

        Ok(config)
    }

    /// Load the explicit path if one was given, otherwise search the usual spots.
    ///
    /// An explicit path that fails to load is an error; a missing default
    /// file is not.
    pub fn resolve(explicit: Option<&Path>) -> anyhow::Result<Self> {
        match explicit {
            Some(path) => Self::load(path),
            None => Ok(Self::load_or_default()),
        }
    }

    /// Load with default fallback
    pub fn load_or_default() -> Self {
        let paths = [
            PathBuf::from("config").join("hub.toml"),
            PathBuf::from("..").join("config").join("hub.toml"),
        ];

        for path in &paths {
            if path.exists() {
                // tracing is not initialised yet (the level comes from here)
                match Self::load(path) {
                    Ok(config) => return config,
                    Err(e) => {
                        eprintln!("[CONFIG] Warning: Failed to load {}: {}", path.display(), e);
                    }
                }
            }
        }

        Self::default()
    }

    /// Log configuration summary
    pub fn log_summary(&self) {
        info!(
            bind_address = %self.server.bind_address,
            data_file = %self.storage.data_file.display(),
            log_level = %self.logging.level,
            show_sensor_data = self.logging.show_sensor_data,
            "configuration loaded"
        );
        if !self.storage.data_file.exists() {
            warn!(
                data_file = %self.storage.data_file.display(),
                "backing file does not exist yet, starting with an empty history"
            );
        }
    }
}
