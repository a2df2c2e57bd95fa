//! ==============================================================================
//! api.rs - http handlers for the sensor hub
//! ==============================================================================
//!
//! routes:
//!     POST /api/sensor     store one reading          -> {message, timestamp}
//!     GET  /api/sensor     full history               -> [reading, ...]
//!     GET  /api/temp       latest temperature         -> {temp}
//!     GET  /api/humidity   latest humidity            -> {humidity}
//!
//! every handler is one load (or load-append-save) cycle against the store.
//! nothing is cached between requests.
//!
//! relationships:
//!     - used by: main.rs (router), tests/ (router on an ephemeral port)
//!     - uses: store.rs, error.rs, domain.rs
//!
//! ==============================================================================

use axum::{
    extract::{rejection::JsonRejection, State},
    response::Json,
    routing::get,
    Router,
};
use chrono::Utc;
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::domain::SensorReading;
use crate::error::ApiError;
use crate::store::Store;

/// state shared by every handler
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<Store>,
    /// echo each accepted reading to the log
    pub show_sensor_data: bool,
}

impl AppState {
    pub fn new(store: Store, show_sensor_data: bool) -> Self {
        Self { store: Arc::new(store), show_sensor_data }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/sensor", get(list_readings).post(post_reading))
        .route("/api/temp", get(latest_temp))
        .route("/api/humidity", get(latest_humidity))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// POST /api/sensor
///
/// any body that does not deserialize into a reading is a 400, whether the
/// json is broken, a field is missing, or a field has the wrong type.
async fn post_reading(
    State(state): State<AppState>,
    payload: Result<Json<SensorReading>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(reading) = payload.map_err(|rejection| ApiError::Validation(rejection.body_text()))?;
    let reading = reading.stamped(Utc::now());
    let timestamp = reading.timestamp;

    let history = state.store.append(reading).await?;
    match history.last() {
        // only log what actually made it to disk
        Some(stored) if state.show_sensor_data => info!(
            temp = stored.temp,
            dust = stored.dust,
            humidity = stored.humidity,
            timestamp = ?timestamp,
            stored = history.len(),
            "received sensor data"
        ),
        _ => tracing::debug!(stored = history.len(), "reading appended"),
    }

    Ok(Json(json!({
        "message": "Sensor data received successfully",
        "timestamp": timestamp,
    })))
}

/// GET /api/sensor
async fn list_readings(State(state): State<AppState>) -> Result<Json<Vec<SensorReading>>, ApiError> {
    Ok(Json(state.store.load().await?))
}

/// GET /api/temp
async fn latest_temp(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let latest = state.store.latest().await?.ok_or(ApiError::NotFound)?;
    Ok(Json(json!({ "temp": latest.temp })))
}

/// GET /api/humidity
async fn latest_humidity(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let latest = state.store.latest().await?.ok_or(ApiError::NotFound)?;
    Ok(Json(json!({ "humidity": latest.humidity })))
}
