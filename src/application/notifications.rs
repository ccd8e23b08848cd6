// User-facing notifications raised by dashboard operations
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::VecDeque;
use std::sync::Mutex;

const FEED_CAPACITY: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
    pub at: DateTime<Utc>,
}

impl Notification {
    fn success(message: String) -> Self {
        Self {
            kind: NotificationKind::Success,
            message,
            at: Utc::now(),
        }
    }

    fn error(message: String) -> Self {
        Self {
            kind: NotificationKind::Error,
            message,
            at: Utc::now(),
        }
    }

    pub fn dashboard_deleted(name: &str) -> Self {
        Self::success(format!("Dashboard {} deleted successfully.", name))
    }

    pub fn dashboard_delete_failed(name: &str, reason: &str) -> Self {
        Self::error(format!("Failed to delete Dashboard {}: {}.", name, reason))
    }

    pub fn dashboard_not_found(id: &str) -> Self {
        Self::error(format!("Dashboard {} could not be found", id))
    }

    pub fn dashboard_imported(name: &str) -> Self {
        Self::success(format!("Dashboard {} imported successfully.", name))
    }

    pub fn dashboard_import_failed(reason: &str) -> Self {
        Self::error(format!("Failed to import Dashboard: {}.", reason))
    }

    pub fn dashboard_update_failed(name: &str, reason: &str) -> Self {
        Self::error(format!("Failed to update Dashboard {}: {}.", name, reason))
    }

    pub fn cell_deleted(name: &str) -> Self {
        Self::success(format!("Cell {} deleted.", name))
    }
}

pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Writes notifications to the log
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: Notification) {
        match notification.kind {
            NotificationKind::Success => tracing::info!("{}", notification.message),
            NotificationKind::Error => tracing::warn!("{}", notification.message),
        }
    }
}

/// Keeps the latest notifications for the UI to poll
#[derive(Default)]
pub struct MemoryNotifier {
    feed: Mutex<VecDeque<Notification>>,
}

impl MemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> Vec<Notification> {
        match self.feed.lock() {
            Ok(feed) => feed.iter().cloned().collect(),
            Err(poisoned) => poisoned.into_inner().iter().cloned().collect(),
        }
    }
}

impl Notifier for MemoryNotifier {
    fn notify(&self, notification: Notification) {
        TracingNotifier.notify(notification.clone());

        let mut feed = match self.feed.lock() {
            Ok(feed) => feed,
            Err(poisoned) => poisoned.into_inner(),
        };
        if feed.len() == FEED_CAPACITY {
            feed.pop_front();
        }
        feed.push_back(notification);
    }
}
