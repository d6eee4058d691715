//! Exercise CRUD queries.

use super::now_ts;
use super::row_types::{ExerciseRow, ExerciseWithGroupRow, EXERCISE_COLUMNS};
use crate::{Database, DbError, DbResult};
use liftlog_types::{Exercise, ExerciseId, ExerciseWithGroup, GroupId, NewExercise};

const WITH_GROUP_SELECT: &str = "\
    SELECT x.id, x.name, x.group_id, x.created_at, x.updated_at, g.name AS group_name \
    FROM exercises x \
    JOIN exercise_groups g ON g.id = x.group_id";

impl Database {
    /// All exercises with their group name, ordered by exercise name.
    pub async fn list_exercises(&self) -> DbResult<Vec<ExerciseWithGroup>> {
        let rows: Vec<ExerciseWithGroupRow> = sqlx::query_as(&format!(
            "{WITH_GROUP_SELECT} ORDER BY x.name COLLATE NOCASE, x.id"
        ))
        .fetch_all(self.pool())
        .await?;
        Ok(rows
            .into_iter()
            .map(ExerciseWithGroupRow::into_exercise_with_group)
            .collect())
    }

    /// Exercises of one group. `NotFound` when the group does not exist.
    pub async fn exercises_in_group(&self, group_id: GroupId) -> DbResult<Vec<Exercise>> {
        self.get_group(group_id).await?;
        let rows: Vec<ExerciseRow> = sqlx::query_as(&format!(
            "SELECT {EXERCISE_COLUMNS} FROM exercises WHERE group_id = ? \
             ORDER BY name COLLATE NOCASE, id"
        ))
        .bind(group_id.get())
        .fetch_all(self.pool())
        .await?;
        Ok(rows.into_iter().map(ExerciseRow::into_exercise).collect())
    }

    pub async fn get_exercise(&self, id: ExerciseId) -> DbResult<Exercise> {
        let row: Option<ExerciseRow> = sqlx::query_as(&format!(
            "SELECT {EXERCISE_COLUMNS} FROM exercises WHERE id = ?"
        ))
        .bind(id.get())
        .fetch_optional(self.pool())
        .await?;
        row.map(ExerciseRow::into_exercise).ok_or(DbError::NotFound {
            entity: "exercise",
            id: id.get(),
        })
    }

    /// Insert an exercise into an existing group.
    pub async fn create_exercise(&self, new: &NewExercise) -> DbResult<Exercise> {
        self.get_group(new.group_id).await?;

        let now = now_ts();
        let row: ExerciseRow = sqlx::query_as(&format!(
            "INSERT INTO exercises (name, group_id, created_at, updated_at) VALUES (?, ?, ?, ?) \
             RETURNING {EXERCISE_COLUMNS}"
        ))
        .bind(&new.name)
        .bind(new.group_id.get())
        .bind(now)
        .bind(now)
        .fetch_one(self.pool())
        .await
        .map_err(|e| DbError::from_insert(e, "exercise", &new.name))?;
        Ok(row.into_exercise())
    }

    /// Delete an exercise. Its logged sets go with it.
    pub async fn delete_exercise(&self, id: ExerciseId) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM exercises WHERE id = ?")
            .bind(id.get())
            .execute(self.pool())
            .await?;
        if result.rows_affected() == 0 {
            return Err(DbError::NotFound {
                entity: "exercise",
                id: id.get(),
            });
        }
        Ok(())
    }
}
