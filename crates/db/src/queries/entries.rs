//! Workout entry CRUD and range reads.

use super::now_ts;
use super::row_types::{EntryRow, EntryWithExerciseRow, ENTRY_COLUMNS};
use crate::{Database, DbError, DbResult};
use chrono::NaiveDate;
use liftlog_core::{DateRange, Scope};
use liftlog_types::{EntryId, EntryUpdate, EntryWithExercise, ExerciseId, NewEntry, WorkoutEntry};

const WITH_EXERCISE_SELECT: &str = "\
    SELECT w.id, w.exercise_id, w.weight_centi, w.reps, w.workout_date, w.created_at, \
           x.name AS exercise_name \
    FROM workout_entries w \
    JOIN exercises x ON x.id = w.exercise_id";

/// Optional filters for listing entries. Dates are inclusive.
#[derive(Debug, Clone, Copy, Default)]
pub struct EntryFilter {
    pub exercise_id: Option<ExerciseId>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl Database {
    /// Log a set. `workout_date` falls back to `today`.
    pub async fn create_entry(&self, new: &NewEntry, today: NaiveDate) -> DbResult<WorkoutEntry> {
        self.get_exercise(new.exercise_id).await?;

        let row: EntryRow = sqlx::query_as(&format!(
            "INSERT INTO workout_entries (exercise_id, weight_centi, reps, workout_date, created_at) \
             VALUES (?, ?, ?, ?, ?) RETURNING {ENTRY_COLUMNS}"
        ))
        .bind(new.exercise_id.get())
        .bind(new.weight_kg.hundredths())
        .bind(new.reps)
        .bind(new.date_or(today))
        .bind(now_ts())
        .fetch_one(self.pool())
        .await?;
        Ok(row.into_entry())
    }

    pub async fn get_entry(&self, id: EntryId) -> DbResult<WorkoutEntry> {
        let row: Option<EntryRow> = sqlx::query_as(&format!(
            "SELECT {ENTRY_COLUMNS} FROM workout_entries WHERE id = ?"
        ))
        .bind(id.get())
        .fetch_optional(self.pool())
        .await?;
        row.map(EntryRow::into_entry).ok_or(DbError::NotFound {
            entity: "entry",
            id: id.get(),
        })
    }

    /// Change weight, reps or date of a logged set. Effort follows through
    /// the generated column.
    pub async fn update_entry(&self, id: EntryId, update: &EntryUpdate) -> DbResult<WorkoutEntry> {
        if update.is_empty() {
            return self.get_entry(id).await;
        }

        let row: Option<EntryRow> = sqlx::query_as(&format!(
            "UPDATE workout_entries SET \
                weight_centi = COALESCE(?, weight_centi), \
                reps = COALESCE(?, reps), \
                workout_date = COALESCE(?, workout_date) \
             WHERE id = ? RETURNING {ENTRY_COLUMNS}"
        ))
        .bind(update.weight_kg.map(|w| w.hundredths()))
        .bind(update.reps)
        .bind(update.workout_date)
        .bind(id.get())
        .fetch_optional(self.pool())
        .await?;
        row.map(EntryRow::into_entry).ok_or(DbError::NotFound {
            entity: "entry",
            id: id.get(),
        })
    }

    pub async fn delete_entry(&self, id: EntryId) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM workout_entries WHERE id = ?")
            .bind(id.get())
            .execute(self.pool())
            .await?;
        if result.rows_affected() == 0 {
            return Err(DbError::NotFound {
                entity: "entry",
                id: id.get(),
            });
        }
        Ok(())
    }

    /// Entries with their exercise name, oldest first.
    pub async fn list_entries(&self, filter: EntryFilter) -> DbResult<Vec<EntryWithExercise>> {
        let rows: Vec<EntryWithExerciseRow> = sqlx::query_as(&format!(
            "{WITH_EXERCISE_SELECT} \
             WHERE (?1 IS NULL OR w.exercise_id = ?1) \
               AND (?2 IS NULL OR w.workout_date >= ?2) \
               AND (?3 IS NULL OR w.workout_date <= ?3) \
             ORDER BY w.workout_date ASC, w.id ASC"
        ))
        .bind(filter.exercise_id.map(ExerciseId::get))
        .bind(filter.from)
        .bind(filter.to)
        .fetch_all(self.pool())
        .await?;
        Ok(rows
            .into_iter()
            .map(EntryWithExerciseRow::into_entry_with_exercise)
            .collect())
    }

    /// Every entry of `scope` dated within `range`, oldest first. A group
    /// scope covers all of the group's exercises.
    pub async fn entries_for_scope(
        &self,
        scope: Scope,
        range: DateRange,
    ) -> DbResult<Vec<EntryWithExercise>> {
        let (predicate, id) = match scope {
            Scope::Exercise(id) => ("w.exercise_id = ?", id.get()),
            Scope::Group(id) => ("x.group_id = ?", id.get()),
        };
        let rows: Vec<EntryWithExerciseRow> = sqlx::query_as(&format!(
            "{WITH_EXERCISE_SELECT} \
             WHERE {predicate} AND w.workout_date BETWEEN ? AND ? \
             ORDER BY w.workout_date ASC, w.id ASC"
        ))
        .bind(id)
        .bind(range.start)
        .bind(range.end)
        .fetch_all(self.pool())
        .await?;
        Ok(rows
            .into_iter()
            .map(EntryWithExerciseRow::into_entry_with_exercise)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use crate::{Database, DbError};
    use chrono::NaiveDate;
    use liftlog_types::{EntryId, EntryUpdate, ExerciseId, Kilograms, NewEntry, NewExercise};

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    async fn seeded() -> (Database, ExerciseId) {
        let db = Database::new_in_memory().await.unwrap();
        let legs = db.create_group("Legs").await.unwrap();
        let squat = db
            .create_exercise(&NewExercise {
                name: "Squat".to_string(),
                group_id: legs.id,
            })
            .await
            .unwrap();
        (db, squat.id)
    }

    fn set(exercise_id: ExerciseId, weight: &str, reps: i64, day: Option<&str>) -> NewEntry {
        NewEntry {
            exercise_id,
            weight_kg: weight.parse().unwrap(),
            reps,
            workout_date: day.map(date),
        }
    }

    #[tokio::test]
    async fn test_create_entry_defaults_date() {
        let (db, squat) = seeded().await;
        let entry = db
            .create_entry(&set(squat, "82.5", 8, None), date("2025-03-10"))
            .await
            .unwrap();
        assert_eq!(entry.workout_date, date("2025-03-10"));
        assert_eq!(entry.weight_kg, "82.5".parse::<Kilograms>().unwrap());
        assert_eq!(entry.effort().hundredths(), 66_000);
    }

    #[tokio::test]
    async fn test_generated_effort_column_matches_product() {
        let (db, squat) = seeded().await;
        let entry = db
            .create_entry(&set(squat, "61.25", 7, Some("2025-03-01")), date("2025-03-10"))
            .await
            .unwrap();

        let (stored,): (i64,) =
            sqlx::query_as("SELECT effort_centi FROM workout_entries WHERE id = ?")
                .bind(entry.id.get())
                .fetch_one(db.pool())
                .await
                .unwrap();
        assert_eq!(stored, 6125 * 7);
        assert_eq!(stored, entry.effort().hundredths());

        db.update_entry(
            entry.id,
            &EntryUpdate {
                reps: Some(10),
                ..EntryUpdate::default()
            },
        )
        .await
        .unwrap();
        let (stored,): (i64,) =
            sqlx::query_as("SELECT effort_centi FROM workout_entries WHERE id = ?")
                .bind(entry.id.get())
                .fetch_one(db.pool())
                .await
                .unwrap();
        assert_eq!(stored, 61_250);
    }

    #[tokio::test]
    async fn test_entry_requires_exercise() {
        let (db, _) = seeded().await;
        let err = db
            .create_entry(&set(ExerciseId(99), "50", 5, None), date("2025-03-10"))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::NotFound { entity: "exercise", id: 99 }));
    }

    #[tokio::test]
    async fn test_update_and_delete_entry() {
        let (db, squat) = seeded().await;
        let entry = db
            .create_entry(&set(squat, "100", 5, Some("2025-03-01")), date("2025-03-10"))
            .await
            .unwrap();

        let updated = db
            .update_entry(
                entry.id,
                &EntryUpdate {
                    weight_kg: Some(Kilograms::from_whole(110)),
                    workout_date: Some(date("2025-03-02")),
                    ..EntryUpdate::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.reps, 5);
        assert_eq!(updated.workout_date, date("2025-03-02"));
        assert_eq!(updated.effort().hundredths(), 55_000);

        let unchanged = db.update_entry(entry.id, &EntryUpdate::default()).await.unwrap();
        assert_eq!(unchanged, updated);

        db.delete_entry(entry.id).await.unwrap();
        assert!(matches!(
            db.get_entry(entry.id).await.unwrap_err(),
            DbError::NotFound { entity: "entry", .. }
        ));
        let reps_only = EntryUpdate {
            reps: Some(1),
            ..EntryUpdate::default()
        };
        assert!(db.update_entry(entry.id, &reps_only).await.is_err());
        assert!(db.delete_entry(EntryId(entry.id.get() + 1)).await.is_err());
    }
}
