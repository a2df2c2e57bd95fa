//! ==============================================================================
//! error.rs - failure taxonomy for the store and the http api
//! ==============================================================================
//!
//! purpose:
//!     StoreError describes what went wrong with the backing file.
//!     ApiError is what a handler returns; it knows its own status code.
//!
//! mapping:
//!     Validation   -> 400  (reason is returned to the caller)
//!     NotFound     -> 404
//!     Storage(..)  -> 500  (generic message, cause only goes to the log)
//!
//! ==============================================================================

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read backing file")]
    Read(#[source] std::io::Error),
    #[error("failed to write backing file")]
    Write(#[source] std::io::Error),
    #[error("backing file is not a valid reading list")]
    Decode(#[source] serde_json::Error),
    #[error("failed to encode readings")]
    Encode(#[source] serde_json::Error),
}

impl StoreError {
    /// the message handed to http clients; never includes the cause
    pub fn public_message(&self) -> &'static str {
        match self {
            StoreError::Read(_) | StoreError::Decode(_) => "Failed to read sensor data file",
            StoreError::Write(_) | StoreError::Encode(_) => "Failed to write sensor data to file",
        }
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),
    #[error("No sensor data available")]
    NotFound,
    #[error(transparent)]
    Storage(#[from] StoreError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, msg) = match &self {
            ApiError::Validation(reason) => (StatusCode::BAD_REQUEST, reason.clone()),
            ApiError::NotFound => (StatusCode::NOT_FOUND, self.to_string()),
            ApiError::Storage(e) => {
                let cause = std::error::Error::source(e).map(ToString::to_string).unwrap_or_default();
                error!(error = %e, cause = %cause, "storage failure");
                (StatusCode::INTERNAL_SERVER_ERROR, e.public_message().to_string())
            }
        };
        (status, Json(serde_json::json!({ "error": msg }))).into_response()
    }
}
