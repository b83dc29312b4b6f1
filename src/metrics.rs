//! Prometheus metrics for the events proxy.
//!
//! Tracks inbound events requests, upstream latency and upstream failures.
//! Without an installed recorder every call here is a no-op.

use std::time::Instant;

use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use tracing::debug;

// === Metric Name Constants ===

/// Upstream request latency metric name.
pub const METRIC_UPSTREAM_REQUEST_LATENCY: &str = "upstream_request_latency_ms";
/// Events endpoint requests counter metric name.
pub const METRIC_EVENTS_REQUESTS: &str = "events_requests_total";
/// Upstream errors counter metric name.
pub const METRIC_UPSTREAM_ERRORS: &str = "upstream_errors_total";

/// Install the global Prometheus recorder and register metric descriptions.
///
/// Call this once at startup. The returned handle renders the scrape body.
pub fn init_metrics() -> Result<PrometheusHandle, BuildError> {
    let handle = PrometheusBuilder::new().install_recorder()?;

    describe_histogram!(
        METRIC_UPSTREAM_REQUEST_LATENCY,
        "Gamma API request latency in milliseconds"
    );
    describe_counter!(
        METRIC_EVENTS_REQUESTS,
        "Total number of requests to the events endpoint"
    );
    describe_counter!(
        METRIC_UPSTREAM_ERRORS,
        "Total number of failed Gamma API calls by error kind"
    );

    debug!("Metrics initialized");
    Ok(handle)
}

/// Record upstream request latency.
pub fn record_upstream_latency(start: Instant) {
    let latency_ms = start.elapsed().as_secs_f64() * 1000.0;
    histogram!(METRIC_UPSTREAM_REQUEST_LATENCY).record(latency_ms);
}

/// Increment events requests counter.
pub fn inc_events_requests() {
    counter!(METRIC_EVENTS_REQUESTS).increment(1);
}

/// Increment upstream errors counter for the given error kind.
pub fn inc_upstream_errors(kind: &'static str) {
    counter!(METRIC_UPSTREAM_ERRORS, "kind" => kind).increment(1);
}
