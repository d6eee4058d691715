//! Notification fan-out.
//!
//! Handlers and the analyzer report notices through [`NoticeHub`]; every
//! connected `/api/notifications` stream receives a copy. Notices raised
//! while nobody listens are logged and dropped.

use liftlog_core::Reporter;
use liftlog_types::{Notice, NoticeKind};
use tokio::sync::broadcast;

pub struct NoticeHub {
    tx: broadcast::Sender<Notice>,
}

impl NoticeHub {
    pub fn new(capacity: usize) -> Self {
        Self {
            tx: broadcast::channel(capacity).0,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Notice> {
        self.tx.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Reporter for NoticeHub {
    fn report(&self, notice: Notice) {
        match notice.kind {
            NoticeKind::Error => tracing::warn!(message = %notice.message, "notice"),
            _ => tracing::debug!(kind = ?notice.kind, message = %notice.message, "notice"),
        }
        // No subscribers is not an error.
        let _ = self.tx.send(notice);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_without_subscribers() {
        let hub = NoticeHub::new(4);
        hub.report(Notice::info("nobody home"));
        assert_eq!(hub.subscriber_count(), 0);
    }

    #[tokio::test]
    async fn test_every_subscriber_gets_a_copy() {
        let hub = NoticeHub::new(4);
        let mut a = hub.subscribe();
        let mut b = hub.subscribe();
        hub.report(Notice::error("Failed to fetch data"));
        assert_eq!(a.recv().await.unwrap().message, "Failed to fetch data");
        assert_eq!(b.recv().await.unwrap().kind, NoticeKind::Error);
    }
}
