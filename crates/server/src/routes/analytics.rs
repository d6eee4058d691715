//! Chart endpoints.
//!
//! `POST /api/analytics` runs the analyzer for an exercise or a group over a
//! window preset. Only one analysis per scope runs at a time; a second
//! request for the same scope gets 409 while the first is loading. An empty
//! selection is not an error, just nothing to draw (204).

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use liftlog_core::{AnalysisError, Chart, Scope, Window};
use liftlog_types::{ExerciseId, GroupId};
use serde::Deserialize;

use crate::error::ApiResult;
use crate::metrics::record_analysis;
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/analytics", post(analyze))
        .route("/analytics/latest", get(latest))
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub exercise_id: Option<ExerciseId>,
    #[serde(default)]
    pub group_id: Option<GroupId>,
    /// Defaults to the week preset.
    #[serde(default)]
    pub window: Option<Window>,
}

fn outcome(result: &Result<Arc<Chart>, AnalysisError>) -> &'static str {
    match result {
        Ok(_) => "ok",
        Err(AnalysisError::EmptyScope) => "empty",
        Err(AnalysisError::InFlight(_)) => "in_flight",
        Err(_) => "error",
    }
}

/// POST /api/analytics - `{exerciseId?, groupId?, window}`.
///
/// The exercise wins when both ids are given.
pub async fn analyze(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> ApiResult<Json<Chart>> {
    let Json(request) = payload?;
    let scope = Scope::from_selection(request.exercise_id, request.group_id);
    let window = request.window.unwrap_or(Window::Week);

    let result = state.analyzer.analyze(scope, window).await;
    record_analysis(scope.map_or("none", |s| s.mode()), outcome(&result));

    let chart = result?;
    Ok(Json(chart.as_ref().clone()))
}

/// GET /api/analytics/latest - the last chart any request produced.
pub async fn latest(State(state): State<Arc<AppState>>) -> Response {
    match state.analyzer.latest() {
        Some(chart) => Json(chart.as_ref().clone()).into_response(),
        None => StatusCode::NO_CONTENT.into_response(),
    }
}
