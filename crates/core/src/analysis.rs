// crates/core/src/analysis.rs
//! Analysis orchestration: scope + window in, chart out.
//!
//! The [`Analyzer`] resolves the window against today's date, fetches the
//! rows through an [`EntrySource`], builds the timeline and runs the
//! aggregation engine. It also owns the per-scope loading flag and retains
//! the latest chart it produced.

use crate::aggregate::{aggregate_group, aggregate_single, EffortPoint, SeriesPoint};
use crate::error::{AnalysisError, SourceError};
use crate::interval::{generate, Granularity};
use crate::palette::color_for;
use crate::window::{today, DateRange, Window};
use async_trait::async_trait;
use chrono::NaiveDate;
use liftlog_types::{EntryWithExercise, ExerciseId, GroupId, Notice};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::sync::{Arc, Mutex, RwLock};
use ts_rs::TS;

/// What a chart covers: one exercise, or every exercise of a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "codegen", ts(export, export_to = "../../../web/src/types/generated/"))]
#[serde(tag = "kind", content = "id", rename_all = "lowercase")]
pub enum Scope {
    Exercise(ExerciseId),
    Group(GroupId),
}

impl Scope {
    /// Exercise wins when both are given, matching how the picker works.
    pub fn from_selection(exercise: Option<ExerciseId>, group: Option<GroupId>) -> Option<Self> {
        exercise
            .map(Scope::Exercise)
            .or_else(|| group.map(Scope::Group))
    }

    pub fn mode(&self) -> &'static str {
        match self {
            Scope::Exercise(_) => "single",
            Scope::Group(_) => "group",
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scope::Exercise(id) => write!(f, "exercise {id}"),
            Scope::Group(id) => write!(f, "group {id}"),
        }
    }
}

/// Read side of the store, as far as analysis is concerned.
///
/// Implementations return every entry of the scope whose `workout_date` lies
/// in `range` (inclusive), ordered by date ascending.
#[async_trait]
pub trait EntrySource: Send + Sync {
    async fn entries_in_range(
        &self,
        scope: Scope,
        range: DateRange,
    ) -> Result<Vec<EntryWithExercise>, SourceError>;
}

#[async_trait]
impl<T: EntrySource + ?Sized> EntrySource for Arc<T> {
    async fn entries_in_range(
        &self,
        scope: Scope,
        range: DateRange,
    ) -> Result<Vec<EntryWithExercise>, SourceError> {
        (**self).entries_in_range(scope, range).await
    }
}

/// Sink for user-facing notices.
pub trait Reporter: Send + Sync {
    fn report(&self, notice: Notice);
}

/// Reporter that only logs. Used when nothing listens for notices.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn report(&self, notice: Notice) {
        tracing::info!(kind = ?notice.kind, message = %notice.message, "notice");
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[cfg_attr(feature = "codegen", ts(export, export_to = "../../../web/src/types/generated/"))]
pub struct SeriesInfo {
    pub name: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum ChartData {
    Single {
        points: Vec<EffortPoint>,
    },
    Group {
        series: Vec<SeriesInfo>,
        points: Vec<SeriesPoint>,
    },
}

impl ChartData {
    pub fn len(&self) -> usize {
        match self {
            ChartData::Single { points } => points.len(),
            ChartData::Group { points, .. } => points.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A finished chart, ready for the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Chart {
    pub scope: Scope,
    pub window: Window,
    pub granularity: Granularity,
    pub period_start: NaiveDate,
    pub period_end: NaiveDate,
    #[serde(flatten)]
    pub data: ChartData,
}

pub struct Analyzer<S> {
    source: S,
    reporter: Arc<dyn Reporter>,
    in_flight: Mutex<HashSet<Scope>>,
    latest: RwLock<Option<Arc<Chart>>>,
}

/// Holds a scope's loading flag; clears it on drop, whichever way the
/// analysis ended.
struct LoadingGuard<'a> {
    set: &'a Mutex<HashSet<Scope>>,
    scope: Scope,
}

impl<'a> LoadingGuard<'a> {
    fn acquire(set: &'a Mutex<HashSet<Scope>>, scope: Scope) -> Result<Self, AnalysisError> {
        let mut held = set.lock().unwrap_or_else(|e| e.into_inner());
        if !held.insert(scope) {
            return Err(AnalysisError::InFlight(scope));
        }
        Ok(Self { set, scope })
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        let mut held = self.set.lock().unwrap_or_else(|e| e.into_inner());
        held.remove(&self.scope);
    }
}

impl<S: EntrySource> Analyzer<S> {
    pub fn new(source: S, reporter: Arc<dyn Reporter>) -> Self {
        Self {
            source,
            reporter,
            in_flight: Mutex::new(HashSet::new()),
            latest: RwLock::new(None),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Whether an analysis for `scope` is currently running.
    pub fn is_loading(&self, scope: Scope) -> bool {
        self.in_flight
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .contains(&scope)
    }

    /// The most recently completed chart, from any scope.
    pub fn latest(&self) -> Option<Arc<Chart>> {
        self.latest
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Analyze with the window anchored at today's local date.
    pub async fn analyze(
        &self,
        scope: Option<Scope>,
        window: Window,
    ) -> Result<Arc<Chart>, AnalysisError> {
        self.analyze_at(scope, window, today()).await
    }

    /// Analyze with the window anchored at `today`.
    ///
    /// Failures worth telling the user about go to the reporter; the
    /// retained chart is only replaced on success.
    pub async fn analyze_at(
        &self,
        scope: Option<Scope>,
        window: Window,
        today: NaiveDate,
    ) -> Result<Arc<Chart>, AnalysisError> {
        let scope = scope.ok_or(AnalysisError::EmptyScope)?;
        let _loading = LoadingGuard::acquire(&self.in_flight, scope)?;

        match self.run(scope, window, today).await {
            Ok(chart) => {
                let chart = Arc::new(chart);
                *self.latest.write().unwrap_or_else(|e| e.into_inner()) = Some(chart.clone());
                tracing::debug!(%scope, %window, buckets = chart.data.len(), "analysis complete");
                Ok(chart)
            }
            Err(err) => {
                if err.is_reportable() {
                    self.reporter.report(Notice::error(failure_message(&err)));
                }
                Err(err)
            }
        }
    }

    async fn run(
        &self,
        scope: Scope,
        window: Window,
        today: NaiveDate,
    ) -> Result<Chart, AnalysisError> {
        let range = window.resolve(today);
        let timeline = generate(range.start, range.end, window.granularity())?;

        let entries = self
            .source
            .entries_in_range(scope, range)
            .await
            .map_err(|e| {
                tracing::warn!(%scope, error = %e, "failed to fetch entries for analysis");
                AnalysisError::FetchFailure(e)
            })?;

        let data = match scope {
            Scope::Exercise(_) => ChartData::Single {
                points: aggregate_single(&entries, &timeline),
            },
            Scope::Group(_) => {
                let aggregate = aggregate_group(&entries, &timeline);
                let series = aggregate
                    .series
                    .into_iter()
                    .enumerate()
                    .map(|(i, name)| SeriesInfo {
                        name,
                        color: color_for(i).to_string(),
                    })
                    .collect();
                ChartData::Group {
                    series,
                    points: aggregate.points,
                }
            }
        };

        Ok(Chart {
            scope,
            window,
            granularity: timeline.granularity(),
            period_start: range.start,
            period_end: range.end,
            data,
        })
    }
}

fn failure_message(err: &AnalysisError) -> String {
    match err {
        AnalysisError::FetchFailure(_) => "Failed to fetch data".to_string(),
        other => other.to_string(),
    }
}
