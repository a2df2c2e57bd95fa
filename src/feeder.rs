//! ==============================================================================
//! feeder.rs - simulated sensor node
//! ==============================================================================
//!
//! purpose:
//!     pushes random but plausible readings to the hub, the way a real node
//!     on the bench would. handy for demos and for filling a fresh hub.
//!
//! value ranges:
//!     temp      20.0 - 30.0 °C, one decimal
//!     dust      50 - 150
//!     humidity  60 - 90 %
//!
//! a failed post is logged and the loop moves on to the next reading;
//! the same reading is never resent.
//!
//! ==============================================================================

use anyhow::Result;
use chrono::{DateTime, Utc};
use rand::Rng;
use std::time::Duration;
use tracing::{info, warn};

use crate::config::FeederConfig;
use crate::domain::SensorReading;

/// build one random reading taken at `now`
pub fn random_reading<R: Rng + ?Sized>(rng: &mut R, now: DateTime<Utc>) -> SensorReading {
    let temp: f64 = rng.gen_range(20.0..=30.0);
    SensorReading {
        timestamp: Some(now),
        temp: (temp * 10.0).round() / 10.0,
        dust: rng.gen_range(50..=150),
        humidity: rng.gen_range(60..=90),
    }
}

/// whole-second pause between posts, inclusive on both ends
pub fn next_delay<R: Rng + ?Sized>(rng: &mut R, min_secs: u64, max_secs: u64) -> Duration {
    let (lo, hi) = if min_secs <= max_secs { (min_secs, max_secs) } else { (max_secs, min_secs) };
    Duration::from_secs(rng.gen_range(lo..=hi))
}

/// what the hub said about one post
#[derive(Debug)]
pub enum PostOutcome {
    Accepted,
    Rejected { status: u16, body: String },
}

pub struct Feeder {
    client: reqwest::Client,
    hub_url: String,
    min_interval_seconds: u64,
    max_interval_seconds: u64,
}

impl Feeder {
    pub fn new(config: &FeederConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    pub fn with_client(client: reqwest::Client, config: &FeederConfig) -> Self {
        Self {
            client,
            hub_url: config.hub_url.clone(),
            min_interval_seconds: config.min_interval_seconds,
            max_interval_seconds: config.max_interval_seconds,
        }
    }

    pub fn hub_url(&self) -> &str {
        &self.hub_url
    }

    /// post one reading; transport errors are `Err`, non-200 answers are `Rejected`
    pub async fn post(&self, reading: &SensorReading) -> Result<PostOutcome> {
        let resp = self.client.post(&self.hub_url).json(reading).send().await?;
        let status = resp.status();
        if status == reqwest::StatusCode::OK {
            return Ok(PostOutcome::Accepted);
        }
        let body = resp.text().await.unwrap_or_default();
        Ok(PostOutcome::Rejected { status: status.as_u16(), body })
    }

    /// post forever (or `count` times), sleeping a random interval in between
    pub async fn run(&self, count: Option<u64>) -> Result<()> {
        let mut sent = 0u64;
        loop {
            let reading = random_reading(&mut rand::thread_rng(), Utc::now());

            match self.post(&reading).await {
                Ok(PostOutcome::Accepted) => {
                    info!(
                        temp = reading.temp,
                        dust = reading.dust,
                        humidity = reading.humidity,
                        "data posted successfully"
                    );
                }
                Ok(PostOutcome::Rejected { status, body }) => {
                    warn!(status, response = %body, "failed to post data");
                }
                Err(e) => {
                    warn!(error = %e, url = %self.hub_url, "hub unreachable");
                }
            }

            sent += 1;
            if count.is_some_and(|limit| sent >= limit) {
                return Ok(());
            }

            let delay = next_delay(
                &mut rand::thread_rng(),
                self.min_interval_seconds,
                self.max_interval_seconds,
            );
            tokio::time::sleep(delay).await;
        }
    }
}
