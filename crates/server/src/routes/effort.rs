//! Effort preview for the log form.

use std::sync::Arc;

use axum::extract::rejection::QueryRejection;
use axum::extract::Query;
use axum::routing::get;
use axum::{Json, Router};
use liftlog_types::{Effort, Kilograms};
use serde::{Deserialize, Serialize};

use crate::error::ApiResult;
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/effort/preview", get(preview))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewQuery {
    /// Kept as text so "82.5" parses without float rounding.
    pub weight_kg: String,
    pub reps: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewResponse {
    pub weight_kg: Kilograms,
    pub reps: i64,
    pub effort: Effort,
}

/// GET /api/effort/preview?weightKg=82.5&reps=8
pub async fn preview(
    query: Result<Query<PreviewQuery>, QueryRejection>,
) -> ApiResult<Json<PreviewResponse>> {
    let Query(query) = query?;
    let weight_kg: Kilograms = query.weight_kg.parse()?;
    Ok(Json(PreviewResponse {
        weight_kg,
        reps: query.reps,
        effort: weight_kg.times(query.reps),
    }))
}

#[cfg(test)]
mod tests {
    use crate::routes::test_support::send;
    use axum::http::StatusCode;
    use liftlog_db::Database;
    use serde_json::json;

    #[tokio::test]
    async fn test_preview() {
        let app = crate::create_app(Database::new_in_memory().await.unwrap());

        let (status, body) = send(
            &app,
            "GET",
            "/api/effort/preview?weightKg=62.25&reps=3",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"weightKg": 62.25, "reps": 3, "effort": 186.75}));

        let (status, body) = send(
            &app,
            "GET",
            "/api/effort/preview?weightKg=80&reps=10",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["effort"], 800);
    }

    #[tokio::test]
    async fn test_preview_rejects_bad_input() {
        let app = crate::create_app(Database::new_in_memory().await.unwrap());

        let (status, body) = send(
            &app,
            "GET",
            "/api/effort/preview?weightKg=lots&reps=3",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["details"].as_str().unwrap().contains("lots"));

        let (status, _) = send(&app, "GET", "/api/effort/preview?weightKg=50", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
