//! Exercise group CRUD queries.

use super::now_ts;
use super::row_types::{GroupRow, GROUP_COLUMNS};
use crate::{Database, DbError, DbResult};
use liftlog_types::{ExerciseGroup, GroupId};

impl Database {
    /// All groups, ordered by name.
    pub async fn list_groups(&self) -> DbResult<Vec<ExerciseGroup>> {
        let rows: Vec<GroupRow> = sqlx::query_as(&format!(
            "SELECT {GROUP_COLUMNS} FROM exercise_groups ORDER BY name COLLATE NOCASE, id"
        ))
        .fetch_all(self.pool())
        .await?;
        Ok(rows.into_iter().map(GroupRow::into_group).collect())
    }

    pub async fn get_group(&self, id: GroupId) -> DbResult<ExerciseGroup> {
        let row: Option<GroupRow> = sqlx::query_as(&format!(
            "SELECT {GROUP_COLUMNS} FROM exercise_groups WHERE id = ?"
        ))
        .bind(id.get())
        .fetch_optional(self.pool())
        .await?;
        row.map(GroupRow::into_group).ok_or(DbError::NotFound {
            entity: "group",
            id: id.get(),
        })
    }

    /// Insert a group. Names are unique; a clash is `DuplicateName`.
    pub async fn create_group(&self, name: &str) -> DbResult<ExerciseGroup> {
        let now = now_ts();
        let row: GroupRow = sqlx::query_as(&format!(
            "INSERT INTO exercise_groups (name, created_at, updated_at) VALUES (?, ?, ?) \
             RETURNING {GROUP_COLUMNS}"
        ))
        .bind(name)
        .bind(now)
        .bind(now)
        .fetch_one(self.pool())
        .await
        .map_err(|e| DbError::from_insert(e, "group", name))?;
        Ok(row.into_group())
    }

    /// Delete a group that no exercise references.
    ///
    /// The schema would cascade into exercises and their entries; deleting a
    /// group in use is refused with `GroupInUse` instead.
    pub async fn delete_group(&self, id: GroupId) -> DbResult<()> {
        let mut tx = self.pool().begin().await?;

        let (exercises,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM exercises WHERE group_id = ?")
                .bind(id.get())
                .fetch_one(&mut *tx)
                .await?;
        if exercises > 0 {
            return Err(DbError::GroupInUse {
                id: id.get(),
                exercises,
            });
        }

        let result = sqlx::query("DELETE FROM exercise_groups WHERE id = ?")
            .bind(id.get())
            .execute(&mut *tx)
            .await?;
        if result.rows_affected() == 0 {
            return Err(DbError::NotFound {
                entity: "group",
                id: id.get(),
            });
        }

        tx.commit().await?;
        Ok(())
    }
}
