//! SSE stream of user-facing notices.
//!
//! # Event types
//!
//! | Event name  | Payload                 |
//! |-------------|-------------------------|
//! | `notice`    | `{kind, message}`       |
//! | `heartbeat` | keep-alive comment text |
//!
//! Notices are not replayed: a client only sees what is raised while it is
//! connected.

use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::State;
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::routing::get;
use axum::Router;
use tokio::sync::broadcast::error::RecvError;

use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/notifications", get(notification_stream))
}

/// GET /api/notifications
pub async fn notification_stream(
    State(state): State<Arc<AppState>>,
) -> Sse<impl tokio_stream::Stream<Item = Result<Event, Infallible>>> {
    let mut rx = state.notices.subscribe();

    let stream = async_stream::stream! {
        loop {
            match rx.recv().await {
                Ok(notice) => {
                    yield Ok(Event::default().event("notice").data(
                        serde_json::to_string(&notice).unwrap_or_default()
                    ));
                }
                Err(RecvError::Lagged(n)) => {
                    tracing::warn!("notification client lagged, {} notices dropped", n);
                }
                Err(RecvError::Closed) => break,
            }
        }
    };

    Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("heartbeat"),
    )
}
