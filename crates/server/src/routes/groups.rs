//! Exercise group endpoints.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{delete, get};
use axum::{Json, Router};
use liftlog_types::{Exercise, ExerciseGroup, GroupId, NewGroup};

use super::announce;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/groups", get(list_groups).post(create_group))
        .route("/groups/{id}", delete(delete_group))
        .route("/groups/{id}/exercises", get(group_exercises))
}

/// GET /api/groups
pub async fn list_groups(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<ExerciseGroup>>> {
    Ok(Json(state.db.list_groups().await?))
}

/// POST /api/groups - `{name}`. Blank names are rejected.
pub async fn create_group(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<NewGroup>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<ExerciseGroup>)> {
    let result = async {
        let Json(new) = payload?;
        let name = new.name.trim();
        if name.is_empty() {
            return Err(ApiError::BadRequest("group name is required".to_string()));
        }
        Ok::<_, ApiError>(state.db.create_group(name).await?)
    }
    .await;

    let group = announce(
        &state,
        result,
        |g| format!("Group '{}' created", g.name),
        "Failed to create group",
    )?;
    Ok((StatusCode::CREATED, Json(group)))
}

/// DELETE /api/groups/{id} - refused with 409 while exercises use the group.
pub async fn delete_group(
    State(state): State<Arc<AppState>>,
    Path(id): Path<GroupId>,
) -> ApiResult<StatusCode> {
    let result = state.db.delete_group(id).await.map_err(ApiError::from);
    announce(&state, result, |_| "Group deleted".to_string(), "Failed to delete group")?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/groups/{id}/exercises
pub async fn group_exercises(
    State(state): State<Arc<AppState>>,
    Path(id): Path<GroupId>,
) -> ApiResult<Json<Vec<Exercise>>> {
    Ok(Json(state.db.exercises_in_group(id).await?))
}

#[cfg(test)]
mod tests {
    use crate::routes::test_support::send;
    use axum::http::StatusCode;
    use liftlog_db::Database;
    use liftlog_types::NoticeKind;
    use serde_json::json;

    #[tokio::test]
    async fn test_group_lifecycle() {
        let db = Database::new_in_memory().await.unwrap();
        let state = crate::AppState::new(db);
        let mut notices = state.notices.subscribe();
        let app = crate::create_app_with_state(state);

        let (status, created) = send(
            &app,
            "POST",
            "/api/groups",
            Some(json!({"name": " Legs "})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["name"], "Legs");
        let notice = notices.recv().await.unwrap();
        assert_eq!(notice.kind, NoticeKind::Success);
        assert_eq!(notice.message, "Group 'Legs' created");

        let (status, list) = send(&app, "GET", "/api/groups", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(list.as_array().unwrap().len(), 1);

        let id = created["id"].as_i64().unwrap();
        let (status, exercises) = send(
            &app,
            "GET",
            &format!("/api/groups/{id}/exercises"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(exercises, json!([]));

        let (status, _) = send(&app, "DELETE", &format!("/api/groups/{id}"), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert_eq!(notices.recv().await.unwrap().message, "Group deleted");
    }

    #[tokio::test]
    async fn test_group_errors() {
        let db = Database::new_in_memory().await.unwrap();
        let state = crate::AppState::new(db);
        let mut notices = state.notices.subscribe();
        let app = crate::create_app_with_state(state);

        let (status, _) = send(&app, "POST", "/api/groups", Some(json!({"name": "  "}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(notices.recv().await.unwrap().kind, NoticeKind::Error);

        let (status, _) = send(&app, "POST", "/api/groups", Some(json!({"title": "Legs"}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        send(&app, "POST", "/api/groups", Some(json!({"name": "Legs"}))).await;
        let (status, body) = send(&app, "POST", "/api/groups", Some(json!({"name": "Legs"}))).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"], "Conflict");

        let (status, _) = send(&app, "DELETE", "/api/groups/999", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let (status, _) = send(&app, "GET", "/api/groups/999/exercises", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
