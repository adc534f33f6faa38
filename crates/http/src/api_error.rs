//! Typed API error for HTTP handlers.
//!
//! Handlers return `Result<Json<T>, ApiError>`; this converts domain errors
//! into the `{"detail": ...}` JSON bodies the API exposes. Not-found is the
//! only differentiated failure; everything else collapses into a 500
//! carrying the failure message.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use docsum_service::ServiceError;

/// API error with HTTP status code and message.
#[derive(Debug)]
pub enum ApiError {
    /// 404 Not Found — requested document doesn't exist.
    NotFound(&'static str),
    /// 500 Internal Server Error — any upstream failure. The raw message is
    /// exposed in the body and logged server-side.
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg.to_owned()),
            Self::Internal(msg) => {
                tracing::error!(error = %msg, "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            },
        };
        let body = serde_json::json!({ "detail": detail });
        (status, Json(body)).into_response()
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        Self::Internal(err.to_string())
    }
}
