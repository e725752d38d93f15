pub mod message;
pub mod queue;

pub use queue::{NotificationError, NotificationQueue, MAX_BATCH};
