// crates/types/src/models.rs
//! Store entities and the payloads that create or change them.

use crate::ids::{EntryId, ExerciseId, GroupId};
use crate::weight::{Effort, Kilograms};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// A named bucket of exercises ("Legs", "Push").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[cfg_attr(feature = "codegen", ts(export, export_to = "../../../web/src/types/generated/"))]
#[serde(rename_all = "camelCase")]
pub struct ExerciseGroup {
    pub id: GroupId,
    pub name: String,
    #[ts(type = "number")]
    pub created_at: i64,
    #[ts(type = "number")]
    pub updated_at: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[cfg_attr(feature = "codegen", ts(export, export_to = "../../../web/src/types/generated/"))]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    pub id: ExerciseId,
    pub name: String,
    pub group_id: GroupId,
    #[ts(type = "number")]
    pub created_at: i64,
    #[ts(type = "number")]
    pub updated_at: i64,
}

/// Exercise row joined with its group's name, for listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[cfg_attr(feature = "codegen", ts(export, export_to = "../../../web/src/types/generated/"))]
#[serde(rename_all = "camelCase")]
pub struct ExerciseWithGroup {
    #[serde(flatten)]
    pub exercise: Exercise,
    pub group_name: String,
}

/// One logged set.
///
/// `effort` is always `weight_kg × reps`; it has no setter and is recomputed
/// whenever the entry is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[cfg_attr(feature = "codegen", ts(export, export_to = "../../../web/src/types/generated/"))]
#[serde(rename_all = "camelCase")]
pub struct WorkoutEntry {
    pub id: EntryId,
    pub exercise_id: ExerciseId,
    #[ts(type = "number")]
    pub weight_kg: Kilograms,
    #[ts(type = "number")]
    pub reps: i64,
    #[ts(type = "string")]
    pub workout_date: NaiveDate,
    #[ts(type = "number")]
    effort: Effort,
    #[ts(type = "number")]
    pub created_at: i64,
}

impl WorkoutEntry {
    pub fn new(
        id: EntryId,
        exercise_id: ExerciseId,
        weight_kg: Kilograms,
        reps: i64,
        workout_date: NaiveDate,
        created_at: i64,
    ) -> Self {
        Self {
            id,
            exercise_id,
            weight_kg,
            reps,
            workout_date,
            effort: weight_kg.times(reps),
            created_at,
        }
    }

    pub fn effort(&self) -> Effort {
        self.effort
    }
}

/// Entry joined with the name of its exercise. This is the row shape the
/// analytics reads return; group-mode charts key their series on the name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[cfg_attr(feature = "codegen", ts(export, export_to = "../../../web/src/types/generated/"))]
#[serde(rename_all = "camelCase")]
pub struct EntryWithExercise {
    #[serde(flatten)]
    pub entry: WorkoutEntry,
    pub exercise_name: String,
}

// ============================================================================
// Write payloads
// ============================================================================

#[derive(Debug, Clone, Deserialize, TS)]
#[cfg_attr(feature = "codegen", ts(export, export_to = "../../../web/src/types/generated/"))]
#[serde(rename_all = "camelCase")]
pub struct NewGroup {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize, TS)]
#[cfg_attr(feature = "codegen", ts(export, export_to = "../../../web/src/types/generated/"))]
#[serde(rename_all = "camelCase")]
pub struct NewExercise {
    pub name: String,
    pub group_id: GroupId,
}

/// A set to log. `workout_date` falls back to today when omitted.
#[derive(Debug, Clone, Deserialize, TS)]
#[cfg_attr(feature = "codegen", ts(export, export_to = "../../../web/src/types/generated/"))]
#[serde(rename_all = "camelCase")]
pub struct NewEntry {
    pub exercise_id: ExerciseId,
    #[ts(type = "number | string")]
    pub weight_kg: Kilograms,
    #[ts(type = "number")]
    pub reps: i64,
    #[serde(default)]
    #[ts(type = "string | null")]
    pub workout_date: Option<NaiveDate>,
}

impl NewEntry {
    pub fn date_or(&self, today: NaiveDate) -> NaiveDate {
        self.workout_date.unwrap_or(today)
    }
}

/// Partial update of a logged set. Absent fields keep their stored value.
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[cfg_attr(feature = "codegen", ts(export, export_to = "../../../web/src/types/generated/"))]
#[serde(rename_all = "camelCase")]
pub struct EntryUpdate {
    #[serde(default)]
    #[ts(type = "number | string | null")]
    pub weight_kg: Option<Kilograms>,
    #[serde(default)]
    #[ts(type = "number | null")]
    pub reps: Option<i64>,
    #[serde(default)]
    #[ts(type = "string | null")]
    pub workout_date: Option<NaiveDate>,
}

impl EntryUpdate {
    pub fn is_empty(&self) -> bool {
        self.weight_kg.is_none() && self.reps.is_none() && self.workout_date.is_none()
    }
}
