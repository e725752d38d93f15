//! Course CRUD handlers.
//!
//! Each successful mutation is followed by a notification on the shared
//! queue. Notification failures are absorbed by the queue and never change
//! the handler's response.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::errors::AppError;
use crate::models::course::{Course, NewCourse, UpdateCourse};
use crate::models::notification::EntityOperation;
use crate::state::AppState;

/// Entity type name used in course notifications.
pub const COURSE_ENTITY: &str = "Course";

/// GET /api/courses — list all courses
pub async fn list_courses(State(state): State<Arc<AppState>>) -> Json<Vec<Course>> {
    Json(state.courses.list())
}

/// GET /api/courses/:id
pub async fn get_course(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<Course>, AppError> {
    state
        .courses
        .get(id)
        .map(Json)
        .ok_or(AppError::CourseNotFound(id))
}

/// POST /api/courses — create a course
pub async fn create_course(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NewCourse>,
) -> Result<(StatusCode, Json<Course>), AppError> {
    let course = state.courses.insert(payload.validate()?)?;
    tracing::info!(course_id = course.course_id, title = %course.title, "course created");

    notify(&state, &course, EntityOperation::Create);

    Ok((StatusCode::CREATED, Json(course)))
}

/// PUT /api/courses/:id — replace a course's fields
pub async fn update_course(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateCourse>,
) -> Result<Json<Course>, AppError> {
    let course = payload.validate(id)?;
    state.courses.update(course.clone())?;
    tracing::info!(course_id = id, "course updated");

    notify(&state, &course, EntityOperation::Update);

    Ok(Json(course))
}

/// DELETE /api/courses/:id
pub async fn delete_course(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<StatusCode, AppError> {
    let removed = state.courses.remove(id)?;
    tracing::info!(course_id = id, "course deleted");

    notify(&state, &removed, EntityOperation::Delete);

    Ok(StatusCode::NO_CONTENT)
}

fn notify(state: &AppState, course: &Course, operation: EntityOperation) {
    state.notifications.send_named(
        COURSE_ENTITY,
        &course.course_id.to_string(),
        Some(&course.title),
        operation,
        None,
    );
}
