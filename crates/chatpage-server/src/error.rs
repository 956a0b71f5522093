use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use chatpage_openai::error::ProviderError;

pub const API_KEY_MISSING: &str = "API key missing";
pub const INVALID_PROMPT: &str = "Invalid prompt";
pub const INVALID_MODEL: &str = "Invalid or missing model selection";
pub const DEFAULT_UPSTREAM_ERROR: &str = "Internal Server Error";

/// Unified API error type for all route handlers.
#[derive(Debug)]
pub enum ApiError {
    /// The provider credential is absent.
    Configuration(String),
    BadRequest(String),
    /// The upstream completion call failed; the message is shown to callers.
    Upstream(String),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Configuration(msg) => {
                tracing::error!("configuration error: {msg}");
                (StatusCode::INTERNAL_SERVER_ERROR, msg)
            }
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Upstream(msg) if msg.trim().is_empty() => (
                StatusCode::INTERNAL_SERVER_ERROR,
                DEFAULT_UPSTREAM_ERROR.to_string(),
            ),
            ApiError::Upstream(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

impl From<ProviderError> for ApiError {
    fn from(e: ProviderError) -> Self {
        tracing::error!(error = %e, "error generating text");
        ApiError::Upstream(e.message())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::BadRequest(e.to_string())
    }
}
