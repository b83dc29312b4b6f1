//! Unified error types for the events server.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use strum::IntoStaticStr;
use thiserror::Error;

/// Process-level error type.
#[derive(Error, Debug)]
pub enum ServerError {
    /// Configuration loading error.
    #[error("configuration error: {0}")]
    Config(#[from] envy::Error),

    /// Configuration loaded but failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Gamma API client error.
    #[error("client error: {0}")]
    Client(#[from] ClientError),

    /// Metrics recorder could not be installed.
    #[error("metrics error: {0}")]
    Metrics(#[from] metrics_exporter_prometheus::BuildError),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors returned by the Gamma API client.
///
/// Every variant is terminal; the client never retries.
#[derive(Error, Debug, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum ClientError {
    /// The base URL could not be turned into a request URL.
    #[error("failed to parse base URL: {0}")]
    Url(#[from] url::ParseError),

    /// The request never produced a response (connect, DNS, timeout).
    #[error("failed to make request: {0}")]
    Request(#[source] reqwest::Error),

    /// Upstream answered with something other than 200.
    #[error("API returned status {status}: {body}")]
    Status {
        /// HTTP status code returned upstream.
        status: u16,
        /// Raw response body, kept for diagnostics.
        body: String,
    },

    /// The response body stream failed mid-read.
    #[error("failed to read response body: {0}")]
    Body(#[source] reqwest::Error),

    /// The body was not a JSON array of events.
    #[error("failed to unmarshal JSON: {0}")]
    Decode(#[from] serde_json::Error),

    /// The HTTP transport itself could not be built.
    #[error("failed to create HTTP client: {0}")]
    Build(#[source] reqwest::Error),
}

impl ClientError {
    /// Stable snake_case label for logs and metrics.
    pub fn kind(&self) -> &'static str {
        self.into()
    }
}

/// Errors produced by the HTTP handlers.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Request used a verb other than GET.
    #[error("Method not allowed")]
    MethodNotAllowed,

    /// `limit` was present but not a non-negative integer.
    #[error("Invalid limit parameter")]
    InvalidLimit,

    /// The upstream fetch failed.
    #[error("Failed to fetch events: {0}")]
    Fetch(#[from] ClientError),

    /// Encoding the successful response failed.
    #[error("failed to encode response: {0}")]
    Encode(#[source] serde_json::Error),
}

/// JSON error envelope: `{"error": "..."}`.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
}

impl ApiError {
    /// HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::InvalidLimit => StatusCode::BAD_REQUEST,
            ApiError::Fetch(_) | ApiError::Encode(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Encode failures carry no envelope, only the status.
        if let ApiError::Encode(_) = self {
            return status.into_response();
        }

        let body = ErrorResponse {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, ServerError>;
