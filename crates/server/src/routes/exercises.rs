//! Exercise endpoints.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{delete, get};
use axum::{Json, Router};
use liftlog_core::LABEL_KEY;
use liftlog_types::{Exercise, ExerciseId, ExerciseWithGroup, NewExercise};

use super::announce;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/exercises", get(list_exercises).post(create_exercise))
        .route("/exercises/{id}", delete(delete_exercise))
}

/// GET /api/exercises - every exercise with its group's name.
pub async fn list_exercises(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<ExerciseWithGroup>>> {
    Ok(Json(state.db.list_exercises().await?))
}

/// POST /api/exercises - `{name, groupId}`.
pub async fn create_exercise(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<NewExercise>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Exercise>)> {
    let result = async {
        let Json(mut new) = payload?;
        new.name = new.name.trim().to_string();
        if new.name.is_empty() {
            return Err(ApiError::BadRequest("exercise name is required".to_string()));
        }
        if new.name == LABEL_KEY {
            return Err(ApiError::BadRequest(format!(
                "exercise name '{LABEL_KEY}' is reserved"
            )));
        }
        Ok::<_, ApiError>(state.db.create_exercise(&new).await?)
    }
    .await;

    let exercise = announce(
        &state,
        result,
        |e| format!("Exercise '{}' added", e.name),
        "Failed to add exercise",
    )?;
    Ok((StatusCode::CREATED, Json(exercise)))
}

/// DELETE /api/exercises/{id} - also removes the exercise's logged sets.
pub async fn delete_exercise(
    State(state): State<Arc<AppState>>,
    Path(id): Path<ExerciseId>,
) -> ApiResult<StatusCode> {
    let result = state.db.delete_exercise(id).await.map_err(ApiError::from);
    announce(
        &state,
        result,
        |_| "Exercise deleted".to_string(),
        "Failed to delete exercise",
    )?;
    Ok(StatusCode::NO_CONTENT)
}
