//! API route handlers for the liftlog server.

pub mod analytics;
pub mod effort;
pub mod entries;
pub mod exercises;
pub mod groups;
pub mod health;
pub mod metrics;
pub mod notifications;

use std::sync::Arc;

use axum::Router;
use liftlog_types::Notice;

use crate::error::ApiResult;
use crate::state::AppState;

/// Create the combined API router with all routes under /api prefix.
///
/// Routes:
/// - GET    /api/health - Health check
/// - GET    /api/groups - List exercise groups
/// - POST   /api/groups - Create a group
/// - DELETE /api/groups/{id} - Delete an unused group
/// - GET    /api/groups/{id}/exercises - Exercises of one group
/// - GET    /api/exercises - List exercises with group names
/// - POST   /api/exercises - Create an exercise
/// - DELETE /api/exercises/{id} - Delete an exercise and its sets
/// - GET    /api/entries - List logged sets (exerciseId/from/to filters)
/// - POST   /api/entries - Log a set
/// - PUT    /api/entries/{id} - Edit a set
/// - DELETE /api/entries/{id} - Delete a set
/// - GET    /api/effort/preview - Effort for a weight/reps pair
/// - POST   /api/analytics - Build a chart for an exercise or group
/// - GET    /api/analytics/latest - Most recently built chart
/// - GET    /api/notifications - SSE stream of notices
/// - GET    /api/metrics - Prometheus metrics
pub fn api_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .nest("/api", health::router())
        .nest("/api", groups::router())
        .nest("/api", exercises::router())
        .nest("/api", entries::router())
        .nest("/api", effort::router())
        .nest("/api", analytics::router())
        .nest("/api", notifications::router())
        .nest("/api", metrics::router())
        .with_state(state)
}

/// Report a write's outcome as a notice, then hand the result back.
pub(crate) fn announce<T>(
    state: &AppState,
    result: ApiResult<T>,
    success: impl FnOnce(&T) -> String,
    failure: &str,
) -> ApiResult<T> {
    match &result {
        Ok(value) => state.notify(Notice::success(success(value))),
        Err(err) => state.notify(Notice::error(format!("{failure}: {}", err.user_message()))),
    }
    result
}
