//! Logged-set endpoints.

use std::sync::Arc;

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, put};
use axum::{Json, Router};
use chrono::NaiveDate;
use liftlog_core::window::today;
use liftlog_db::EntryFilter;
use liftlog_types::{EntryId, EntryUpdate, EntryWithExercise, ExerciseId, NewEntry, WorkoutEntry};
use serde::Deserialize;

use super::announce;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/entries", get(list_entries).post(create_entry))
        .route("/entries/{id}", put(update_entry).delete(delete_entry))
}

/// Query parameters for GET /api/entries. Dates are inclusive.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntriesQuery {
    pub exercise_id: Option<ExerciseId>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl From<EntriesQuery> for EntryFilter {
    fn from(q: EntriesQuery) -> Self {
        EntryFilter {
            exercise_id: q.exercise_id,
            from: q.from,
            to: q.to,
        }
    }
}

/// GET /api/entries - sets with their exercise name, oldest first.
pub async fn list_entries(
    State(state): State<Arc<AppState>>,
    query: Result<Query<EntriesQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<EntryWithExercise>>> {
    let Query(query) = query?;
    Ok(Json(state.db.list_entries(query.into()).await?))
}

/// POST /api/entries - `{exerciseId, weightKg, reps, workoutDate?}`.
pub async fn create_entry(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<NewEntry>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<WorkoutEntry>)> {
    let result = async {
        let Json(new) = payload?;
        Ok::<_, ApiError>(state.db.create_entry(&new, today()).await?)
    }
    .await;

    let entry = announce(
        &state,
        result,
        |e| format!("Logged {} kg × {}", e.weight_kg, e.reps),
        "Failed to log set",
    )?;
    Ok((StatusCode::CREATED, Json(entry)))
}

/// PUT /api/entries/{id} - partial update; absent fields are kept.
pub async fn update_entry(
    State(state): State<Arc<AppState>>,
    Path(id): Path<EntryId>,
    payload: Result<Json<EntryUpdate>, JsonRejection>,
) -> ApiResult<Json<WorkoutEntry>> {
    let result = async {
        let Json(update) = payload?;
        Ok::<_, ApiError>(state.db.update_entry(id, &update).await?)
    }
    .await;

    let entry = announce(&state, result, |_| "Set updated".to_string(), "Failed to update set")?;
    Ok(Json(entry))
}

/// DELETE /api/entries/{id}
pub async fn delete_entry(
    State(state): State<Arc<AppState>>,
    Path(id): Path<EntryId>,
) -> ApiResult<StatusCode> {
    let result = state.db.delete_entry(id).await.map_err(ApiError::from);
    announce(&state, result, |_| "Set deleted".to_string(), "Failed to delete set")?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use crate::routes::test_support::send;
    use axum::http::StatusCode;
    use axum::Router;
    use liftlog_db::Database;
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};

    async fn app_with_exercise() -> (Router, i64) {
        let app = crate::create_app(Database::new_in_memory().await.unwrap());
        let (_, group) = send(&app, "POST", "/api/groups", Some(json!({"name": "Legs"}))).await;
        let (_, exercise) = send(
            &app,
            "POST",
            "/api/exercises",
            Some(json!({"name": "Squat", "groupId": group["id"]})),
        )
        .await;
        let id = exercise["id"].as_i64().unwrap();
        (app, id)
    }

    fn entry(exercise_id: i64, weight: Value, reps: i64, date: &str) -> Option<Value> {
        Some(json!({
            "exerciseId": exercise_id,
            "weightKg": weight,
            "reps": reps,
            "workoutDate": date,
        }))
    }

    #[tokio::test]
    async fn test_create_and_list_entries() {
        let (app, squat) = app_with_exercise().await;

        let (status, created) = send(
            &app,
            "POST",
            "/api/entries",
            entry(squat, json!("82.5"), 8, "2025-01-05"),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["weightKg"], json!(82.5));
        assert_eq!(created["effort"], json!(660));
        assert_eq!(created["workoutDate"], "2025-01-05");

        send(&app, "POST", "/api/entries", entry(squat, json!(100), 5, "2025-01-02")).await;
        send(&app, "POST", "/api/entries", entry(squat, json!(60), 10, "2025-02-01")).await;

        let (status, all) = send(&app, "GET", "/api/entries", None).await;
        assert_eq!(status, StatusCode::OK);
        let dates: Vec<&str> = all
            .as_array()
            .unwrap()
            .iter()
            .map(|e| e["workoutDate"].as_str().unwrap())
            .collect();
        assert_eq!(dates, vec!["2025-01-02", "2025-01-05", "2025-02-01"]);
        assert_eq!(all[0]["exerciseName"], "Squat");

        let uri = format!("/api/entries?exerciseId={squat}&from=2025-01-03&to=2025-01-31");
        let (status, filtered) = send(&app, "GET", &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(filtered.as_array().unwrap().len(), 1);
        assert_eq!(filtered[0]["effort"], json!(660));
    }

    #[tokio::test]
    async fn test_entry_date_defaults_to_today() {
        let (app, squat) = app_with_exercise().await;
        let (status, created) = send(
            &app,
            "POST",
            "/api/entries",
            Some(json!({"exerciseId": squat, "weightKg": 40, "reps": 12})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(
            created["workoutDate"],
            liftlog_core::window::today().to_string()
        );
    }

    #[tokio::test]
    async fn test_update_recomputes_effort() {
        let (app, squat) = app_with_exercise().await;
        let (_, created) = send(
            &app,
            "POST",
            "/api/entries",
            entry(squat, json!(100), 5, "2025-01-05"),
        )
        .await;
        let id = created["id"].as_i64().unwrap();

        let (status, updated) = send(
            &app,
            "PUT",
            &format!("/api/entries/{id}"),
            Some(json!({"reps": 3})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["reps"], 3);
        assert_eq!(updated["weightKg"], 100);
        assert_eq!(updated["effort"], 300);

        let (status, _) = send(&app, "DELETE", &format!("/api/entries/{id}"), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (status, _) = send(
            &app,
            "PUT",
            &format!("/api/entries/{id}"),
            Some(json!({"reps": 1})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_entry_validation() {
        let (app, squat) = app_with_exercise().await;

        let (status, body) = send(
            &app,
            "POST",
            "/api/entries",
            entry(squat, json!("heavy"), 5, "2025-01-05"),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Bad request");

        let (status, _) = send(
            &app,
            "POST",
            "/api/entries",
            entry(999, json!(50), 5, "2025-01-05"),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(&app, "GET", "/api/entries?from=yesterday", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
