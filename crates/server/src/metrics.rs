//! Application metrics for Prometheus monitoring.
//!
//! This module provides:
//! - Prometheus metrics recorder initialization
//! - Request and analysis counters
//! - A middleware that times every routed request

use axum::extract::{MatchedPath, Request};
use axum::middleware::Next;
use axum::response::Response;
use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::sync::OnceLock;
use std::time::{Duration, Instant};

/// Global Prometheus handle for rendering metrics.
static PROMETHEUS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Initialize the Prometheus metrics recorder.
///
/// Returns `true` if initialization succeeded, `false` if already initialized.
pub fn init_metrics() -> bool {
    if PROMETHEUS_HANDLE.get().is_some() {
        return false;
    }

    let recorder = PrometheusBuilder::new().build_recorder();
    let handle = recorder.handle();

    if metrics::set_global_recorder(recorder).is_err() {
        tracing::warn!("Failed to set global metrics recorder (already set)");
        return false;
    }

    if PROMETHEUS_HANDLE.set(handle).is_err() {
        tracing::warn!("Failed to store Prometheus handle (already set)");
    }

    describe_metrics();

    tracing::info!("Prometheus metrics initialized");
    true
}

fn describe_metrics() {
    describe_counter!("liftlog_requests_total", "Total number of API requests");
    describe_histogram!(
        "liftlog_request_duration_seconds",
        "Duration of API requests in seconds"
    );
    describe_counter!(
        "liftlog_analysis_total",
        "Analysis requests by chart mode and outcome"
    );
}

/// Render current metrics in Prometheus text format.
///
/// Returns `None` if metrics are not initialized.
pub fn render_metrics() -> Option<String> {
    PROMETHEUS_HANDLE.get().map(|h| h.render())
}

/// Record a completed API request.
pub fn record_request(endpoint: &str, status: u16, duration: Duration) {
    counter!(
        "liftlog_requests_total",
        "endpoint" => endpoint.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    histogram!("liftlog_request_duration_seconds", "endpoint" => endpoint.to_string())
        .record(duration.as_secs_f64());
}

/// Record one analysis attempt. `mode` is `single`, `group` or `none`.
pub fn record_analysis(mode: &'static str, outcome: &'static str) {
    counter!("liftlog_analysis_total", "mode" => mode, "outcome" => outcome).increment(1);
}

/// Middleware: time each request and label it with its route template
/// (`/api/entries/{id}`), so ids don't explode the label set.
pub async fn track_requests(request: Request, next: Next) -> Response {
    let endpoint = request
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| "unmatched".to_string());
    let start = Instant::now();

    let response = next.run(request).await;

    record_request(&endpoint, response.status().as_u16(), start.elapsed());
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_without_recorder_is_noop() {
        record_request("/api/health", 200, Duration::from_millis(3));
        record_analysis("single", "ok");
    }

    #[test]
    fn test_init_metrics_once() {
        let first = init_metrics();
        let second = init_metrics();
        assert!(!second);
        if first {
            record_analysis("group", "ok");
            let output = render_metrics().unwrap();
            assert!(output.contains("liftlog_analysis_total"));
        }
    }
}
