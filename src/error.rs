//! Error types for the football-data gateway
//!
//! `FetchError` is the typed failure taxonomy of the fetch pipeline. It is never
//! turned into an HTTP error status: the orchestrator always serves a payload and
//! only attaches the error for callers that want the reason.
//!
//! `ApiError` covers requests too malformed to produce any payload.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Fetch Error Enum ==
/// Why a request could not be answered with fresh upstream data.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The local rate budget for the current window is exhausted
    #[error("Rate limit exceeded")]
    AdmissionRejected,

    /// The upstream API signalled its own rate limit (HTTP 429)
    #[error("Upstream quota exceeded: {message}")]
    UpstreamQuotaExceeded { message: String },

    /// The upstream API rejected the request (4xx other than 429)
    #[error("Upstream rejected request ({status}): {message}")]
    UpstreamClient { status: u16, message: String },

    /// The upstream API failed (5xx or unexpected status)
    #[error("Upstream error ({status}): {message}")]
    UpstreamServer { status: u16, message: String },

    /// Timeout, DNS failure, connection reset
    #[error("Network failure: {0}")]
    Network(String),

    /// Non-JSON body or a body without the expected shape
    #[error("Malformed upstream response: {0}")]
    MalformedResponse(String),
}

impl FetchError {
    /// Maps an upstream HTTP error status to its taxonomy entry.
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status {
            429 => FetchError::UpstreamQuotaExceeded { message },
            400..=499 => FetchError::UpstreamClient { status, message },
            _ => FetchError::UpstreamServer { status, message },
        }
    }

    /// Stable machine-readable name, used in diagnostics output.
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::AdmissionRejected => "admission_rejected",
            FetchError::UpstreamQuotaExceeded { .. } => "upstream_quota_exceeded",
            FetchError::UpstreamClient { .. } => "upstream_client_error",
            // Malformed bodies are reported as upstream server errors
            FetchError::UpstreamServer { .. } | FetchError::MalformedResponse(_) => {
                "upstream_server_error"
            }
            FetchError::Network(_) => "network_failure",
        }
    }

    /// Numeric code placed in the `errorCode` field of degraded payloads.
    pub fn error_code(&self) -> u16 {
        match self {
            FetchError::AdmissionRejected | FetchError::UpstreamQuotaExceeded { .. } => 429,
            FetchError::UpstreamClient { status, .. } | FetchError::UpstreamServer { status, .. } => {
                *status
            }
            FetchError::Network(_) => 503,
            FetchError::MalformedResponse(_) => 502,
        }
    }

    /// Short human-readable hint for the UI.
    pub fn user_message(&self) -> &'static str {
        match self.error_code() {
            400 => "Invalid request - check the endpoint or API token",
            403 => "API token is invalid or expired",
            404 => "Endpoint does not exist",
            429 => "Too many requests. Please wait before trying again.",
            502 | 503 => "Could not reach the football data API",
            _ => "Unknown football data API error",
        }
    }
}

// == Api Error Enum ==
/// Errors surfaced as non-200 HTTP responses.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, msg),
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the HTTP surface.
pub type Result<T> = std::result::Result<T, ApiError>;
