use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Actor recorded on events whose producer did not name one.
pub const SYSTEM_ACTOR: &str = "System";

/// The kind of record mutation that triggered a notification.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "UPPERCASE")]
pub enum EntityOperation {
    Create,
    Update,
    Delete,
}

impl fmt::Display for EntityOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityOperation::Create => "CREATE",
            EntityOperation::Update => "UPDATE",
            EntityOperation::Delete => "DELETE",
        };
        f.write_str(name)
    }
}

/// A single entity-change event as handed to pollers.
///
/// Built only by [`NotificationQueue`](crate::notification::queue::NotificationQueue);
/// `message`, `created_at` and `is_read` are never caller-supplied.
#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NotificationEvent {
    pub id: Uuid,
    pub entity_type: String,
    pub entity_id: String,
    pub operation: EntityOperation,
    pub message: String,
    pub created_at: DateTime<Utc>,
    pub created_by: String,
    pub is_read: bool,
}

/// Identifier a client sends when acknowledging a notification. Any JSON
/// scalar is accepted.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum NotificationRef {
    Id(Uuid),
    Number(i64),
    Text(String),
}

impl fmt::Display for NotificationRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotificationRef::Id(id) => write!(f, "{}", id),
            NotificationRef::Number(n) => write!(f, "{}", n),
            NotificationRef::Text(s) => f.write_str(s),
        }
    }
}
