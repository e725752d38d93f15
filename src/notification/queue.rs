//! Process-wide FIFO of entity-change notifications.
//!
//! Producers (record-mutation handlers) push with [`NotificationQueue::send`] /
//! [`NotificationQueue::send_named`]; pollers drain with
//! [`NotificationQueue::receive`] or [`NotificationQueue::receive_batch`].
//! Every event is handed to exactly one receiver (competing consumers).
//!
//! Delivery is best-effort: `send` never returns an error and never blocks on
//! anything but the internal lock. Failures are logged and the event is dropped.
//!
//! The queue is unbounded unless built with
//! [`NotificationQueue::with_capacity_limit`]. Nothing is persisted; pending
//! events are lost when the process exits.
//!
//! A panic while the lock is held poisons it and disables the queue for the
//! rest of the process: sends are dropped, receives return
//! [`NotificationError::Poisoned`], and [`NotificationQueue::len`] reports
//! zero. Events pending at that moment are never delivered. The first
//! failure is logged at error level.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};

use chrono::Utc;
use thiserror::Error;
use uuid::Uuid;

use crate::models::notification::{
    EntityOperation, NotificationEvent, NotificationRef, SYSTEM_ACTOR,
};
use crate::notification::message::format_message;

/// Upper bound on events returned by one [`NotificationQueue::receive_batch`] call.
pub const MAX_BATCH: usize = 10;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NotificationError {
    #[error("notification queue lock poisoned")]
    Poisoned,

    #[error("notification queue full ({capacity} pending)")]
    QueueFull { capacity: usize },
}

pub struct NotificationQueue {
    pending: Mutex<VecDeque<NotificationEvent>>,
    capacity: Option<usize>,
    poison_reported: AtomicBool,
}

impl NotificationQueue {
    pub fn new() -> Self {
        Self {
            pending: Mutex::new(VecDeque::new()),
            capacity: None,
            poison_reported: AtomicBool::new(false),
        }
    }

    /// Bounded variant: once `capacity` events are pending, new sends are
    /// dropped (and logged) until a poller drains the queue.
    pub fn with_capacity_limit(capacity: usize) -> Self {
        Self {
            pending: Mutex::new(VecDeque::new()),
            capacity: Some(capacity),
            poison_reported: AtomicBool::new(false),
        }
    }

    /// Record a change to `entity_type` #`entity_id`, referring to it by id.
    pub fn send(
        &self,
        entity_type: &str,
        entity_id: &str,
        operation: EntityOperation,
        actor: Option<&str>,
    ) {
        self.send_named(entity_type, entity_id, None, operation, actor);
    }

    /// Record a change, using `display_name` in the message when it is not blank.
    /// `actor` defaults to [`SYSTEM_ACTOR`].
    pub fn send_named(
        &self,
        entity_type: &str,
        entity_id: &str,
        display_name: Option<&str>,
        operation: EntityOperation,
        actor: Option<&str>,
    ) {
        let message = format_message(entity_type, entity_id, display_name, operation);
        let created_by = actor.unwrap_or(SYSTEM_ACTOR);

        match self.enqueue(entity_type, entity_id, operation, message, created_by) {
            Ok(id) => {
                tracing::debug!(
                    notification_id = %id,
                    entity_type,
                    entity_id,
                    operation = %operation,
                    "notification queued"
                );
            }
            Err(e) => {
                tracing::warn!(
                    entity_type,
                    entity_id,
                    operation = %operation,
                    "failed to send notification: {}",
                    e
                );
            }
        }
    }

    fn enqueue(
        &self,
        entity_type: &str,
        entity_id: &str,
        operation: EntityOperation,
        message: String,
        created_by: &str,
    ) -> Result<Uuid, NotificationError> {
        let mut pending = self.lock()?;

        if let Some(capacity) = self.capacity {
            if pending.len() >= capacity {
                return Err(NotificationError::QueueFull { capacity });
            }
        }

        let id = Uuid::new_v4();
        // Stamped under the lock so created_at follows enqueue order.
        pending.push_back(NotificationEvent {
            id,
            entity_type: entity_type.to_string(),
            entity_id: entity_id.to_string(),
            operation,
            message,
            created_at: Utc::now(),
            created_by: created_by.to_string(),
            is_read: false,
        });
        Ok(id)
    }

    /// Remove and return the oldest pending event, or `None` if there is none.
    pub fn receive(&self) -> Result<Option<NotificationEvent>, NotificationError> {
        let mut pending = self.lock()?;
        Ok(pending.pop_front())
    }

    /// Drain up to [`MAX_BATCH`] events in enqueue order.
    pub fn receive_batch(&self) -> Result<Vec<NotificationEvent>, NotificationError> {
        let mut batch = Vec::with_capacity(MAX_BATCH);
        while batch.len() < MAX_BATCH {
            match self.receive()? {
                Some(event) => batch.push(event),
                None => break,
            }
        }
        Ok(batch)
    }

    fn lock(&self) -> Result<MutexGuard<'_, VecDeque<NotificationEvent>>, NotificationError> {
        self.pending.lock().map_err(|_| {
            if !self.poison_reported.swap(true, Ordering::Relaxed) {
                tracing::error!(
                    "notification queue disabled: lock poisoned, pending events will not be delivered"
                );
            }
            NotificationError::Poisoned
        })
    }

    /// Acknowledge an event.
    ///
    /// Read state is not tracked: a delivered event has already left the
    /// queue, so there is nothing to update.
    pub fn mark_read(&self, id: &NotificationRef) {
        tracing::debug!(notification_id = %id, "mark_read: read state is not tracked");
    }

    /// Number of events a poller can still receive. Zero once the queue is
    /// disabled.
    pub fn len(&self) -> usize {
        self.lock().map(|pending| pending.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity_limit(&self) -> Option<usize> {
        self.capacity
    }

    /// Poison the internal lock so tests can exercise the failure paths.
    #[cfg(test)]
    pub(crate) fn poison_for_test(&self) {
        std::thread::scope(|s| {
            let _ = s
                .spawn(|| {
                    let _guard = self.pending.lock();
                    panic!("poisoning notification queue");
                })
                .join();
        });
    }
}

impl Default for NotificationQueue {
    fn default() -> Self {
        Self::new()
    }
}
