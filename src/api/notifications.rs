use std::sync::Arc;

use axum::{body::Bytes, extract::State, Json};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::models::notification::NotificationRef;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct MarkReadRequest {
    pub id: Option<NotificationRef>,
}

/// GET /api/notifications — drain up to one batch of pending notifications
///
/// Always answers 200; a drain failure is reported as `success: false`.
pub async fn poll_notifications(State(state): State<Arc<AppState>>) -> Json<Value> {
    match state.notifications.receive_batch() {
        Ok(notifications) => Json(json!({
            "success": true,
            "count": notifications.len(),
            "notifications": notifications,
        })),
        Err(e) => {
            tracing::error!("Error retrieving notifications: {}", e);
            Json(json!({
                "success": false,
                "message": "Error retrieving notifications",
            }))
        }
    }
}

/// POST /api/notifications/mark-read — acknowledge a notification
///
/// The body is read raw so that any payload, including none at all, gets
/// `{ "success": true }`.
pub async fn mark_read(State(state): State<Arc<AppState>>, body: Bytes) -> Json<Value> {
    match serde_json::from_slice::<MarkReadRequest>(&body) {
        Ok(MarkReadRequest { id: Some(id) }) => state.notifications.mark_read(&id),
        Ok(MarkReadRequest { id: None }) => {
            tracing::debug!("mark-read request without an id");
        }
        Err(e) => {
            tracing::debug!("mark-read request with unreadable body: {}", e);
        }
    }
    Json(json!({ "success": true }))
}
