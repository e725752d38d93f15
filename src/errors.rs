use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("course {0} not found")]
    CourseNotFound(i32),

    #[error("course {0} already exists")]
    CourseExists(i32),

    #[error("validation failed: {0}")]
    Validation(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_type, code, msg) = match &self {
            AppError::CourseNotFound(id) => (
                StatusCode::NOT_FOUND,
                "not_found_error",
                "course_not_found",
                format!("course {} not found", id),
            ),
            AppError::CourseExists(id) => (
                StatusCode::CONFLICT,
                "conflict_error",
                "course_exists",
                format!("course {} already exists", id),
            ),
            AppError::Validation(reason) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "invalid_request_error",
                "validation_failed",
                reason.clone(),
            ),
        };

        let body = Json(json!({
            "error": {
                "message": msg,
                "type": error_type,
                "code": code,
            }
        }));

        (status, body).into_response()
    }
}
