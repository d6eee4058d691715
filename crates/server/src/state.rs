// crates/server/src/state.rs
//! Application state for the Axum server.

use crate::notices::NoticeHub;
use liftlog_core::Analyzer;
use liftlog_db::Database;
use liftlog_types::Notice;
use std::sync::Arc;
use std::time::Instant;

/// Notices buffered per SSE subscriber before it starts lagging.
const NOTICE_CAPACITY: usize = 64;

/// Shared application state accessible from all route handlers.
pub struct AppState {
    /// Server start time for uptime tracking.
    pub start_time: Instant,
    /// Database handle for CRUD queries.
    pub db: Database,
    /// Chart builder. Holds the per-scope loading flag and the latest chart.
    pub analyzer: Analyzer<Database>,
    /// Notification fan-out to `/api/notifications` subscribers.
    pub notices: Arc<NoticeHub>,
}

impl AppState {
    /// Create a new application state wrapped in an Arc for sharing.
    pub fn new(db: Database) -> Arc<Self> {
        let notices = Arc::new(NoticeHub::new(NOTICE_CAPACITY));
        Arc::new(Self {
            start_time: Instant::now(),
            analyzer: Analyzer::new(db.clone(), notices.clone()),
            db,
            notices,
        })
    }

    /// Get server uptime in seconds.
    pub fn uptime_secs(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    pub fn notify(&self, notice: Notice) {
        use liftlog_core::Reporter;
        self.notices.report(notice);
    }
}
