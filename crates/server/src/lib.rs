// crates/server/src/lib.rs
//! liftlog server library.
//!
//! Axum HTTP API over the workout store: group, exercise and set CRUD, the
//! effort preview, chart analysis, an SSE notice stream and Prometheus
//! metrics.

pub mod error;
pub mod metrics;
pub mod notices;
pub mod routes;
pub mod state;

pub use error::*;
pub use routes::api_routes;
pub use state::AppState;

use std::sync::Arc;

use axum::Router;
use liftlog_db::Database;
use liftlog_observability::{propagate_request_id_layer, set_request_id_layer, trace_layer};
use tower_http::cors::{Any, CorsLayer};

/// Create the Axum application with all routes and middleware.
///
/// This sets up:
/// - API routes under `/api`
/// - CORS for development (allows any origin)
/// - Request metrics, tracing and `x-request-id` handling
pub fn create_app(db: Database) -> Router {
    create_app_with_state(AppState::new(db))
}

/// Same as [`create_app`] for callers that keep a handle on the state.
pub fn create_app_with_state(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Last layer added runs first: the request id exists before the trace
    // span is made.
    Router::new()
        .merge(api_routes(state))
        .layer(axum::middleware::from_fn(metrics::track_requests))
        .layer(cors)
        .layer(propagate_request_id_layer())
        .layer(trace_layer())
        .layer(set_request_id_layer())
}

// ============================================================================
// Integration Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::test_support::send;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use serde_json::json;
    use tower::ServiceExt;

    async fn test_app() -> Router {
        create_app(Database::new_in_memory().await.unwrap())
    }

    #[tokio::test]
    async fn test_unknown_route_is_404() {
        let app = test_app().await;
        let (status, _) = send(&app, "GET", "/api/nope", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_wrong_method_is_405() {
        let app = test_app().await;
        let (status, _) = send(&app, "PUT", "/api/groups", None).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    }

    // ========================================================================
    // CORS Tests
    // ========================================================================

    #[tokio::test]
    async fn test_cors_headers() {
        let app = test_app().await;

        let response = app
            .oneshot(
                Request::builder()
                    .method("OPTIONS")
                    .uri("/api/health")
                    .header("Origin", "http://localhost:5173")
                    .header("Access-Control-Request-Method", "GET")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert!(
            response.headers().contains_key("access-control-allow-origin"),
            "Expected access-control-allow-origin header"
        );
    }

    #[tokio::test]
    async fn test_request_id_on_response() {
        let app = test_app().await;
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/health")
                    .header("x-request-id", "abc-123")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.headers().get("x-request-id").unwrap(), "abc-123");
    }

    // ========================================================================
    // End-to-end
    // ========================================================================

    #[tokio::test]
    async fn test_log_then_chart() {
        let state = AppState::new(Database::new_in_memory().await.unwrap());
        let app = create_app_with_state(state.clone());

        let (_, push) = send(&app, "POST", "/api/groups", Some(json!({"name": "Push"}))).await;
        let (_, bench) = send(
            &app,
            "POST",
            "/api/exercises",
            Some(json!({"name": "Bench", "groupId": push["id"]})),
        )
        .await;
        let today = liftlog_core::window::today().to_string();
        let (status, _) = send(
            &app,
            "POST",
            "/api/entries",
            Some(json!({
                "exerciseId": bench["id"],
                "weightKg": "62.5",
                "reps": 4,
                "workoutDate": today,
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, chart) = send(
            &app,
            "POST",
            "/api/analytics",
            Some(json!({"exerciseId": bench["id"], "groupId": push["id"], "window": "month"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        // Exercise wins over group.
        assert_eq!(chart["mode"], "single");
        let points = chart["points"].as_array().unwrap();
        assert_eq!(points.last().unwrap()["effort"], 250);
        assert!(!state.analyzer.is_loading(liftlog_core::Scope::Exercise(
            liftlog_types::ExerciseId(bench["id"].as_i64().unwrap())
        )));

        let (status, latest) = send(&app, "GET", "/api/analytics/latest", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(latest, chart);

        let (status, _) = send(&app, "DELETE", &format!("/api/groups/{}", push["id"]), None).await;
        assert_eq!(status, StatusCode::CONFLICT);
    }
}
