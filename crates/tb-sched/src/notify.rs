//! Fire-and-forget run notifications.
//!
//! The run loop must never block on, or fail because of, an outbound
//! report.  [`DetachedNotifier`] hands each notification to a fresh,
//! never-joined thread; delivery errors are logged at `warn` and dropped.
//! Delivery itself (webhook, stats endpoint) is a [`NotificationSink`]
//! supplied by the embedding application.

use std::sync::Arc;
use std::thread;

use tracing::{info, warn};

use tb_core::Millis;

use crate::NotifyError;

/// A report about the run.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum Notification {
    Started {
        bot: String,
    },
    Stats {
        bot:           String,
        runtime_ms:    Millis,
        ticks:         u64,
        reward_events: u64,
        world_changes: u64,
        status:        String,
    },
    Stopped {
        bot:        String,
        runtime_ms: Millis,
        reason:     String,
    },
}

/// Delivers notifications.  Called off the run-loop thread.
pub trait NotificationSink: Send + Sync + 'static {
    fn deliver(&self, notification: &Notification) -> Result<(), NotifyError>;
}

/// Accepts notifications from the run loop.  Must not block.
pub trait Notifier {
    fn notify(&self, notification: Notification);
}

/// Drops every notification.
pub struct NoopNotifier;

impl Notifier for NoopNotifier {
    fn notify(&self, _notification: Notification) {}
}

/// Delivers each notification on its own detached thread.
pub struct DetachedNotifier {
    sink: Arc<dyn NotificationSink>,
}

impl DetachedNotifier {
    pub fn new(sink: impl NotificationSink) -> Self {
        Self { sink: Arc::new(sink) }
    }
}

impl Notifier for DetachedNotifier {
    fn notify(&self, notification: Notification) {
        let sink = Arc::clone(&self.sink);
        let spawned = thread::Builder::new()
            .name("tb-notify".into())
            .spawn(move || {
                if let Err(e) = sink.deliver(&notification) {
                    warn!(error = %e, "notification dropped");
                }
            });
        if let Err(e) = spawned {
            warn!(error = %e, "could not spawn notification thread");
        }
    }
}

/// Sink that writes notifications to the log.
pub struct LogSink;

impl NotificationSink for LogSink {
    fn deliver(&self, notification: &Notification) -> Result<(), NotifyError> {
        info!(?notification, "notification");
        Ok(())
    }
}
