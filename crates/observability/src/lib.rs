//! Logging setup and HTTP request tracing for liftlog.
//!
//! [`init_tracing`] installs the global subscriber: an `EnvFilter`, a stderr
//! layer (compact or JSON) and, when enabled, a daily-rolling file layer.
//! The request-id helpers tag every HTTP request with `x-request-id` and put
//! it on the request span.

use axum::http::{HeaderName, Request};
use liftlog_core::{paths, LogConfig, LogFormat};
use std::path::Path;
use thiserror::Error;
use tower_http::classify::{ServerErrorsAsFailures, SharedClassifier};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::{MakeSpan, TraceLayer};
use tracing::Span;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

pub const REQUEST_ID_HEADER: &str = "x-request-id";
const LOG_FILE_PREFIX: &str = "liftlog.log";

#[derive(Debug, Error)]
pub enum InitError {
    #[error("invalid log filter '{directive}': {message}")]
    Filter { directive: String, message: String },

    #[error("failed to determine log directory")]
    NoLogDir,

    #[error("failed to install tracing subscriber: {0}")]
    Install(#[from] tracing_subscriber::util::TryInitError),
}

/// Keeps the file writer alive. Dropping it flushes pending log lines.
#[must_use = "dropping the guard stops file logging"]
pub struct TracingGuard {
    _file: Option<WorkerGuard>,
}

/// Build the filter: `RUST_LOG` when set, otherwise the configured directive.
pub fn build_filter(directive: &str, rust_log: Option<&str>) -> Result<EnvFilter, InitError> {
    let directive = rust_log
        .filter(|s| !s.trim().is_empty())
        .unwrap_or(directive);
    EnvFilter::try_new(directive).map_err(|e| InitError::Filter {
        directive: directive.to_string(),
        message: e.to_string(),
    })
}

/// Install the global subscriber, logging files (if enabled) under the
/// cache directory.
pub fn init_tracing(config: &LogConfig) -> Result<TracingGuard, InitError> {
    let log_dir = if config.file {
        Some(paths::log_dir().ok_or(InitError::NoLogDir)?)
    } else {
        None
    };
    init_tracing_in(config, log_dir.as_deref())
}

/// Like [`init_tracing`] with an explicit log directory.
pub fn init_tracing_in(
    config: &LogConfig,
    log_dir: Option<&Path>,
) -> Result<TracingGuard, InitError> {
    let rust_log = std::env::var("RUST_LOG").ok();
    let filter = build_filter(&config.filter, rust_log.as_deref())?;

    let stderr = match config.format {
        LogFormat::Compact => fmt::layer()
            .compact()
            .with_writer(std::io::stderr)
            .boxed(),
        LogFormat::Json => fmt::layer()
            .json()
            .with_current_span(true)
            .with_writer(std::io::stderr)
            .boxed(),
    };

    let (file, guard) = match log_dir.filter(|_| config.file) {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_ansi(false).with_writer(writer).boxed();
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr)
        .with(file)
        .try_init()?;

    Ok(TracingGuard { _file: guard })
}

/// Span for one HTTP request, carrying the request id set by
/// [`set_request_id_layer`].
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestSpan;

impl<B> MakeSpan<B> for RequestSpan {
    fn make_span(&mut self, request: &Request<B>) -> Span {
        let request_id = request
            .headers()
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("-");
        tracing::info_span!(
            "request",
            method = %request.method(),
            uri = %request.uri(),
            request_id = %request_id,
        )
    }
}

pub fn trace_layer() -> TraceLayer<SharedClassifier<ServerErrorsAsFailures>, RequestSpan> {
    TraceLayer::new_for_http().make_span_with(RequestSpan)
}

/// Assigns a UUID `x-request-id` to requests that arrive without one.
pub fn set_request_id_layer() -> SetRequestIdLayer<MakeRequestUuid> {
    SetRequestIdLayer::new(HeaderName::from_static(REQUEST_ID_HEADER), MakeRequestUuid)
}

/// Copies the request's `x-request-id` onto the response.
pub fn propagate_request_id_layer() -> PropagateRequestIdLayer {
    PropagateRequestIdLayer::new(HeaderName::from_static(REQUEST_ID_HEADER))
}
