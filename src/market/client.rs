//! Gamma API client wrapper.

use std::time::{Duration, Instant};

use reqwest::StatusCode;
use tracing::{debug, instrument};
use url::Url;

use crate::error::ClientError;
use crate::metrics;

use super::types::{Event, FetchOptions};

/// Polymarket Gamma API client.
///
/// Holds no mutable state: the base URL and transport are fixed at
/// construction, and each call performs exactly one outbound request.
#[derive(Debug, Clone)]
pub struct GammaClient {
    /// HTTP client for API requests.
    http: reqwest::Client,
    /// Base URL for the Gamma API.
    base_url: String,
}

impl GammaClient {
    /// Create a client with its own transport.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        Self::with_timeout(base_url, None)
    }

    /// Create a client with an optional overall request timeout.
    pub fn with_timeout(
        base_url: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, ClientError> {
        Ok(Self::with_http_client(build_http_client(timeout)?, base_url))
    }

    /// Create a client on top of an existing transport.
    ///
    /// `reqwest::Client` is reference-counted, so this is cheap and shares
    /// the transport's connection pool.
    pub fn with_http_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build the `/events` URL for the given options.
    pub fn events_url(&self, options: Option<&FetchOptions>) -> Result<Url, ClientError> {
        let mut url = Url::parse(&format!("{}/events", self.base_url))?;

        {
            let mut query = url.query_pairs_mut();
            query.append_pair("active", "true");
            query.append_pair("closed", "false");

            if let Some(limit) = options.and_then(FetchOptions::effective_limit) {
                query.append_pair("limit", &limit.to_string());
            }
        }

        Ok(url)
    }

    /// Fetch active, non-closed events in upstream order.
    #[instrument(skip(self), fields(base_url = %self.base_url))]
    pub async fn fetch_active_events(
        &self,
        options: Option<&FetchOptions>,
    ) -> Result<Vec<Event>, ClientError> {
        let url = self.events_url(options)?;
        debug!(url = %url, "Fetching active events");

        let start = Instant::now();
        let result = self.get_events(url).await;
        metrics::record_upstream_latency(start);

        match &result {
            Ok(events) => debug!(count = events.len(), "Fetched active events"),
            Err(e) => metrics::inc_upstream_errors(e.kind()),
        }

        result
    }

    async fn get_events(&self, url: Url) -> Result<Vec<Event>, ClientError> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(ClientError::Request)?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            return Err(ClientError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.bytes().await.map_err(ClientError::Body)?;
        let events: Vec<Event> = serde_json::from_slice(&body)?;

        Ok(events)
    }
}

/// Build the outbound transport.
pub fn build_http_client(timeout: Option<Duration>) -> Result<reqwest::Client, ClientError> {
    let mut builder = reqwest::Client::builder();
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder.build().map_err(ClientError::Build)
}
