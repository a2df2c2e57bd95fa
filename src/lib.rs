//! sensor-hub: stores sensor readings in one JSON file and serves them over HTTP.
//!
//! The `sensor-hub` binary runs the API; the `feeder` binary plays a sensor
//! node and posts random readings to it.

pub mod api;
pub mod config;
pub mod domain;
pub mod error;
pub mod feeder;
pub mod logging;
pub mod store;
