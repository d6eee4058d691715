// crates/core/src/error.rs
use crate::analysis::Scope;
use chrono::NaiveDate;
use std::path::PathBuf;
use thiserror::Error;

/// Boxed error returned by an [`EntrySource`](crate::analysis::EntrySource).
pub type SourceError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can end an analysis request.
///
/// None of these is fatal; the caller may simply trigger analysis again.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("Failed to fetch workout data: {0}")]
    FetchFailure(#[source] SourceError),

    #[error("Invalid range: start {start} is after end {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    #[error("No exercise or group selected")]
    EmptyScope,

    #[error("Analysis already running for {0}")]
    InFlight(Scope),
}

impl AnalysisError {
    /// Whether the error should surface as a user notification.
    ///
    /// An empty selection is a precondition, not a failure, and an in-flight
    /// refusal is the loading state the UI already shows.
    pub fn is_reportable(&self) -> bool {
        matches!(self, Self::FetchFailure(_) | Self::InvalidRange { .. })
    }
}

/// Errors that can occur when loading the TOML configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("IO error reading config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed config {path}: {message}")]
    Malformed { path: PathBuf, message: String },
}

impl ConfigError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound { path },
            _ => Self::Io { path, source },
        }
    }
}
