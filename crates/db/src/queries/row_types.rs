// crates/db/src/queries/row_types.rs
// Internal row types and their conversion into domain models.

use chrono::NaiveDate;
use liftlog_types::{
    EntryId, EntryWithExercise, Exercise, ExerciseGroup, ExerciseId, ExerciseWithGroup, GroupId,
    Kilograms, WorkoutEntry,
};
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row};

pub(crate) const GROUP_COLUMNS: &str = "id, name, created_at, updated_at";
pub(crate) const EXERCISE_COLUMNS: &str = "id, name, group_id, created_at, updated_at";
pub(crate) const ENTRY_COLUMNS: &str =
    "id, exercise_id, weight_centi, reps, workout_date, created_at";

#[derive(Debug)]
pub(crate) struct GroupRow {
    id: i64,
    name: String,
    created_at: i64,
    updated_at: i64,
}

impl<'r> FromRow<'r, SqliteRow> for GroupRow {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

impl GroupRow {
    pub(crate) fn into_group(self) -> ExerciseGroup {
        ExerciseGroup {
            id: GroupId(self.id),
            name: self.name,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(Debug)]
pub(crate) struct ExerciseRow {
    id: i64,
    name: String,
    group_id: i64,
    created_at: i64,
    updated_at: i64,
}

impl<'r> FromRow<'r, SqliteRow> for ExerciseRow {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            group_id: row.try_get("group_id")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

impl ExerciseRow {
    pub(crate) fn into_exercise(self) -> Exercise {
        Exercise {
            id: ExerciseId(self.id),
            name: self.name,
            group_id: GroupId(self.group_id),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Exercise joined with `exercise_groups.name AS group_name`.
#[derive(Debug)]
pub(crate) struct ExerciseWithGroupRow {
    exercise: ExerciseRow,
    group_name: String,
}

impl<'r> FromRow<'r, SqliteRow> for ExerciseWithGroupRow {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            exercise: ExerciseRow::from_row(row)?,
            group_name: row.try_get("group_name")?,
        })
    }
}

impl ExerciseWithGroupRow {
    pub(crate) fn into_exercise_with_group(self) -> ExerciseWithGroup {
        ExerciseWithGroup {
            exercise: self.exercise.into_exercise(),
            group_name: self.group_name,
        }
    }
}

#[derive(Debug)]
pub(crate) struct EntryRow {
    id: i64,
    exercise_id: i64,
    weight_centi: i64,
    reps: i64,
    workout_date: NaiveDate,
    created_at: i64,
}

impl<'r> FromRow<'r, SqliteRow> for EntryRow {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            exercise_id: row.try_get("exercise_id")?,
            weight_centi: row.try_get("weight_centi")?,
            reps: row.try_get("reps")?,
            workout_date: row.try_get("workout_date")?,
            created_at: row.try_get("created_at")?,
        })
    }
}

impl EntryRow {
    /// Effort is rebuilt from weight and reps rather than read from the
    /// generated column; both are the same product.
    pub(crate) fn into_entry(self) -> WorkoutEntry {
        WorkoutEntry::new(
            EntryId(self.id),
            ExerciseId(self.exercise_id),
            Kilograms::from_hundredths(self.weight_centi),
            self.reps,
            self.workout_date,
            self.created_at,
        )
    }
}

/// Entry joined with `exercises.name AS exercise_name`.
#[derive(Debug)]
pub(crate) struct EntryWithExerciseRow {
    entry: EntryRow,
    exercise_name: String,
}

impl<'r> FromRow<'r, SqliteRow> for EntryWithExerciseRow {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            entry: EntryRow::from_row(row)?,
            exercise_name: row.try_get("exercise_name")?,
        })
    }
}

impl EntryWithExerciseRow {
    pub(crate) fn into_entry_with_exercise(self) -> EntryWithExercise {
        EntryWithExercise {
            entry: self.entry.into_entry(),
            exercise_name: self.exercise_name,
        }
    }
}
