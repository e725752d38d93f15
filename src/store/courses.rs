use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::errors::AppError;
use crate::models::course::Course;

/// In-memory course records keyed by course number.
///
/// Cheaply cloneable; all clones share the same map.
#[derive(Clone, Default)]
pub struct CourseStore {
    courses: Arc<DashMap<i32, Course>>,
}

impl CourseStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// All courses ordered by course number.
    pub fn list(&self) -> Vec<Course> {
        let mut courses: Vec<Course> = self.courses.iter().map(|e| e.value().clone()).collect();
        courses.sort_by_key(|c| c.course_id);
        courses
    }

    pub fn get(&self, course_id: i32) -> Option<Course> {
        self.courses.get(&course_id).map(|e| e.value().clone())
    }

    pub fn insert(&self, course: Course) -> Result<Course, AppError> {
        match self.courses.entry(course.course_id) {
            Entry::Occupied(_) => Err(AppError::CourseExists(course.course_id)),
            Entry::Vacant(slot) => {
                slot.insert(course.clone());
                Ok(course)
            }
        }
    }

    /// Replace an existing course. Returns the previous record.
    pub fn update(&self, course: Course) -> Result<Course, AppError> {
        match self.courses.get_mut(&course.course_id) {
            Some(mut existing) => Ok(std::mem::replace(existing.value_mut(), course)),
            None => Err(AppError::CourseNotFound(course.course_id)),
        }
    }

    pub fn remove(&self, course_id: i32) -> Result<Course, AppError> {
        self.courses
            .remove(&course_id)
            .map(|(_, course)| course)
            .ok_or(AppError::CourseNotFound(course_id))
    }
}
