// crates/server/src/routes/health.rs
//! Health check endpoint for the API.

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
#[cfg_attr(test, derive(serde::Deserialize))]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
    pub database: String,
}

/// GET /api/health - Server status, version, uptime and store reachability.
///
/// Always 200; a store that fails `SELECT 1` reports `status: "degraded"`.
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let db_ok = ping_store(&state).await;
    Json(HealthResponse {
        status: if db_ok { "ok" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.uptime_secs(),
        database: if db_ok { "ok" } else { "unavailable" }.to_string(),
    })
}

async fn ping_store(state: &AppState) -> bool {
    match state.db.ping().await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "Health check: database unreachable");
            false
        }
    }
}

/// Create the health routes router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/health", get(health_check))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::test_support::send;
    use axum::http::StatusCode;
    use liftlog_db::Database;

    #[tokio::test]
    async fn test_health_endpoint() {
        let db = Database::new_in_memory().await.unwrap();
        let app = crate::create_app(db);
        let (status, json) = send(&app, "GET", "/api/health", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "ok");
        assert_eq!(json["database"], "ok");
        assert!(json["version"].is_string());
        assert!(json["uptime_secs"].is_number());
    }
}
