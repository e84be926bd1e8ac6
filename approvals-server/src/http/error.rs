//! API error types with IntoResponse
//!
//! Errors are converted to `{"message": ...}` JSON responses with the
//! matching status code. Storage failures are logged, never echoed.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::db::StoreError;

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Body could not be read as a request document (400)
    BadRequest { reason: String },

    /// No document matches the id (404)
    NotFound { id: String },

    /// Storage failure (500, logged)
    Store(StoreError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::BadRequest { reason } => {
                tracing::debug!(%reason, "Rejected request body");
                (StatusCode::BAD_REQUEST, "Incorrect body")
            }
            Self::NotFound { id } => {
                tracing::debug!(%id, "Request not found");
                (StatusCode::NOT_FOUND, "Request not found")
            }
            Self::Store(e) => {
                // Log the actual error, return generic message
                tracing::error!("Database error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Database error")
            }
        };

        (status, Json(json!({ "message": message }))).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound { id } => Self::NotFound { id: id.to_string() },
            _ => Self::Store(e),
        }
    }
}
