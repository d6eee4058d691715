/// Inline SQL migrations for the liftlog schema.
///
/// Weights are stored as integer hundredths of a kilogram (`weight_centi`);
/// `effort_centi` is generated by SQLite and never written directly.
/// Dates are ISO `YYYY-MM-DD` text so range filters compare lexically.

pub const MIGRATIONS: &[&str] = &[
    // Migration 1: exercise_groups
    r#"
CREATE TABLE IF NOT EXISTS exercise_groups (
    id         INTEGER PRIMARY KEY AUTOINCREMENT,
    name       TEXT NOT NULL UNIQUE,
    created_at INTEGER NOT NULL,
    updated_at INTEGER NOT NULL
);
"#,
    // Migration 2: exercises
    r#"
CREATE TABLE IF NOT EXISTS exercises (
    id         INTEGER PRIMARY KEY AUTOINCREMENT,
    name       TEXT NOT NULL UNIQUE,
    group_id   INTEGER NOT NULL REFERENCES exercise_groups(id) ON DELETE CASCADE,
    created_at INTEGER NOT NULL,
    updated_at INTEGER NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_exercises_group ON exercises(group_id);
"#,
    // Migration 3: workout_entries
    r#"
CREATE TABLE IF NOT EXISTS workout_entries (
    id           INTEGER PRIMARY KEY AUTOINCREMENT,
    exercise_id  INTEGER NOT NULL REFERENCES exercises(id) ON DELETE CASCADE,
    weight_centi INTEGER NOT NULL,
    reps         INTEGER NOT NULL,
    effort_centi INTEGER GENERATED ALWAYS AS (weight_centi * reps) STORED,
    workout_date TEXT NOT NULL,
    created_at   INTEGER NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_entries_exercise_date ON workout_entries(exercise_id, workout_date);
CREATE INDEX IF NOT EXISTS idx_entries_date ON workout_entries(workout_date);
"#,
];
