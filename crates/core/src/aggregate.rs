// crates/core/src/aggregate.rs
//! Aggregation engine: folds logged sets into timeline buckets.
//!
//! Single mode produces one effort total per bucket. Group mode splits each
//! bucket by exercise name so the chart can draw one series per exercise.
//! All sums stay in fixed-point hundredths until serialization.

use crate::interval::Timeline;
use chrono::NaiveDate;
use liftlog_types::{Effort, EntryWithExercise, WorkoutEntry};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::collections::HashMap;

/// Anything with a date and an effort can be bucketed.
pub trait EffortSample {
    fn workout_date(&self) -> NaiveDate;
    fn effort(&self) -> Effort;
}

/// A sample that also names the series it belongs to.
pub trait NamedSample: EffortSample {
    fn series_name(&self) -> &str;
}

impl EffortSample for WorkoutEntry {
    fn workout_date(&self) -> NaiveDate {
        self.workout_date
    }

    fn effort(&self) -> Effort {
        WorkoutEntry::effort(self)
    }
}

impl EffortSample for EntryWithExercise {
    fn workout_date(&self) -> NaiveDate {
        self.entry.workout_date
    }

    fn effort(&self) -> Effort {
        self.entry.effort()
    }
}

impl NamedSample for EntryWithExercise {
    fn series_name(&self) -> &str {
        &self.exercise_name
    }
}

/// Axis key of every chart record. No series may use it as its name.
pub const LABEL_KEY: &str = "label";

/// One record of a single-exercise chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EffortPoint {
    pub label: String,
    pub effort: Effort,
}

/// One record of a group chart: `{label, <series>: effort, ...}`.
///
/// `values` is empty for buckets without any matching entry; otherwise it
/// holds every series in series order, zero where that exercise had no sets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesPoint {
    pub label: String,
    pub values: Vec<(String, Effort)>,
}

impl SeriesPoint {
    pub fn get(&self, series: &str) -> Option<Effort> {
        self.values
            .iter()
            .find(|(name, _)| name == series)
            .map(|(_, effort)| *effort)
    }

    pub fn is_blank(&self) -> bool {
        self.values.is_empty()
    }
}

impl Serialize for SeriesPoint {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len() + 1))?;
        map.serialize_entry(LABEL_KEY, &self.label)?;
        for (name, effort) in &self.values {
            map.serialize_entry(name, effort)?;
        }
        map.end()
    }
}

/// Group-mode output: series names in first-appearance order plus one record
/// per bucket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupAggregate {
    pub series: Vec<String>,
    pub points: Vec<SeriesPoint>,
}

/// Sum effort per bucket. Always returns exactly `timeline.len()` records, in
/// bucket order; entries outside the window are dropped.
pub fn aggregate_single<E: EffortSample>(entries: &[E], timeline: &Timeline) -> Vec<EffortPoint> {
    let mut totals = vec![Effort::ZERO; timeline.len()];
    for entry in entries {
        if let Some(pos) = timeline.position(entry.workout_date()) {
            totals[pos] += entry.effort();
        }
    }

    timeline
        .buckets()
        .iter()
        .zip(totals)
        .map(|(bucket, effort)| EffortPoint {
            label: bucket.label.clone(),
            effort,
        })
        .collect()
}

/// Distinct series names of the in-window entries, first appearance first.
pub fn series_names<E: NamedSample>(entries: &[E], timeline: &Timeline) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for entry in entries {
        if timeline.position(entry.workout_date()).is_none() {
            continue;
        }
        let name = entry.series_name();
        if !names.iter().any(|n| n == name) {
            names.push(name.to_string());
        }
    }
    names
}

/// Sum effort per bucket and per exercise name.
///
/// Series come from the entries themselves, not from the group's roster, so
/// an exercise with no sets in the window has no series.
pub fn aggregate_group<E: NamedSample>(entries: &[E], timeline: &Timeline) -> GroupAggregate {
    let series = series_names(entries, timeline);
    let index: HashMap<&str, usize> = series
        .iter()
        .enumerate()
        .map(|(i, name)| (name.as_str(), i))
        .collect();

    let mut cells: Vec<Option<Vec<Effort>>> = vec![None; timeline.len()];
    for entry in entries {
        let Some(pos) = timeline.position(entry.workout_date()) else {
            continue;
        };
        let Some(&col) = index.get(entry.series_name()) else {
            continue;
        };
        let row = cells[pos].get_or_insert_with(|| vec![Effort::ZERO; series.len()]);
        row[col] += entry.effort();
    }

    let points = timeline
        .buckets()
        .iter()
        .zip(cells)
        .map(|(bucket, row)| SeriesPoint {
            label: bucket.label.clone(),
            values: row
                .map(|row| series.iter().cloned().zip(row).collect())
                .unwrap_or_default(),
        })
        .collect();

    GroupAggregate { series, points }
}
