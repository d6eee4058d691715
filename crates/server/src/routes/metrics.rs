//! Prometheus scrape endpoint.

use std::sync::Arc;

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};

use crate::metrics::render_metrics;
use crate::state::AppState;

/// GET /api/metrics - Prometheus text format.
///
/// 503 when the recorder was never installed (tests, `--no-metrics`).
pub async fn metrics_handler() -> Response {
    match render_metrics() {
        Some(output) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4; charset=utf-8")],
            output,
        )
            .into_response(),
        None => (StatusCode::SERVICE_UNAVAILABLE, "Metrics not initialized").into_response(),
    }
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/metrics", get(metrics_handler))
}

#[cfg(test)]
mod tests {
    use crate::routes::test_support::send;
    use axum::http::StatusCode;
    use liftlog_db::Database;

    #[tokio::test]
    async fn test_metrics_endpoint() {
        let initialized =
            crate::metrics::init_metrics() || crate::metrics::render_metrics().is_some();
        let app = crate::create_app(Database::new_in_memory().await.unwrap());

        // One routed request so the request counter has a sample.
        send(&app, "GET", "/api/health", None).await;

        let (status, body) = send(&app, "GET", "/api/metrics", None).await;
        if initialized {
            assert_eq!(status, StatusCode::OK);
            assert!(body.as_str().unwrap().contains("liftlog_requests_total"));
        } else {
            assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        }
    }
}
