//! HTTP API handlers.

use axum::extract::{RawQuery, State};
use axum::http::{header, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Serialize;
use tracing::{debug, error};
use url::form_urlencoded;

use crate::config::Config;
use crate::error::{ApiError, ClientError};
use crate::market::{build_http_client, FetchOptions, GammaClient};
use crate::metrics;

/// Plain-text greeting served at `/`.
pub const GREETING: &str = "Hello, World! Welcome to the Polymarket events server.";

/// Application state shared with handlers.
///
/// Immutable after startup. Handlers build a fresh [`GammaClient`] per
/// request on top of the shared transport.
#[derive(Clone)]
pub struct AppState {
    /// Gamma API base URL.
    pub gamma_api_url: String,
    /// Outbound transport.
    pub http: reqwest::Client,
    /// Prometheus handle, when metrics are enabled.
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Create app state from config.
    pub fn new(config: &Config) -> Result<Self, ClientError> {
        Ok(Self {
            gamma_api_url: config.gamma_api_url.clone(),
            http: build_http_client(config.http_timeout())?,
            metrics: None,
        })
    }

    /// Attach a Prometheus handle for the `/metrics` endpoint.
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }

    /// Build a Gamma client for one request.
    pub fn client(&self) -> GammaClient {
        GammaClient::with_http_client(self.http.clone(), self.gamma_api_url.clone())
    }
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Status: "ok".
    pub status: &'static str,
}

/// Root handler - fixed plain-text greeting.
pub async fn root() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/plain")], GREETING)
}

/// Health check handler - always returns 200.
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse { status: "ok" })
}

/// Events handler - proxies active events from the Gamma API.
pub async fn events(
    method: Method,
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> Result<Response, ApiError> {
    metrics::inc_events_requests();

    if method != Method::GET {
        return Err(ApiError::MethodNotAllowed);
    }

    let limit = parse_limit(query.as_deref())?;
    debug!(limit, "Handling events request");

    let client = state.client();
    let options = FetchOptions::with_limit(limit);

    let events = client
        .fetch_active_events(Some(&options))
        .await
        .map_err(|e| {
            error!(kind = e.kind(), "Error fetching events: {}", e);
            ApiError::from(e)
        })?;

    // Encode fully before responding so a failure cannot leave a partial body.
    let body = serde_json::to_vec(&events).map_err(|e| {
        error!("Error encoding response: {}", e);
        ApiError::Encode(e)
    })?;

    Ok(([(header::CONTENT_TYPE, "application/json")], body).into_response())
}

/// Metrics handler - Prometheus text exposition.
pub async fn prometheus_metrics(State(state): State<AppState>) -> Response {
    match &state.metrics {
        Some(handle) => (
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            handle.render(),
        )
            .into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

/// Extract `limit` from a raw query string.
///
/// Absent or empty means 0 (no limit forwarded). Only the first `limit` pair
/// is considered.
pub fn parse_limit(query: Option<&str>) -> Result<u64, ApiError> {
    let raw = query.and_then(|q| {
        form_urlencoded::parse(q.as_bytes())
            .find(|(key, _)| key == "limit")
            .map(|(_, value)| value.into_owned())
    });

    match raw.as_deref() {
        None | Some("") => Ok(0),
        Some(value) => parse_limit_value(value),
    }
}

/// Parse a single `limit` value as a non-negative integer.
pub fn parse_limit_value(value: &str) -> Result<u64, ApiError> {
    let limit: i64 = value.parse().map_err(|_| ApiError::InvalidLimit)?;
    u64::try_from(limit).map_err(|_| ApiError::InvalidLimit)
}
