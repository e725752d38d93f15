use std::sync::Arc;

use crate::config::Config;
use crate::notification::NotificationQueue;
use crate::store::courses::CourseStore;

/// Shared application state passed to handlers.
///
/// Holds the single notification queue for the process; every producer and
/// the poller reach it through this handle.
pub struct AppState {
    pub courses: CourseStore,
    pub notifications: Arc<NotificationQueue>,
    pub config: Config,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let queue = match config.max_pending_notifications {
            Some(limit) => NotificationQueue::with_capacity_limit(limit),
            None => NotificationQueue::new(),
        };
        Self::with_queue(config, Arc::new(queue))
    }

    pub fn with_queue(config: Config, notifications: Arc<NotificationQueue>) -> Self {
        Self {
            courses: CourseStore::new(),
            notifications,
            config,
        }
    }
}
