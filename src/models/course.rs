use serde::{Deserialize, Serialize};

use crate::errors::AppError;

pub const TITLE_MIN_LEN: usize = 3;
pub const TITLE_MAX_LEN: usize = 50;
pub const MAX_CREDITS: i32 = 5;

/// A catalog course. The course number is assigned by the department, not
/// generated by the store.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Course {
    pub course_id: i32,
    pub title: String,
    pub credits: i32,
    pub department_id: i32,
    pub teaching_material_image_path: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct NewCourse {
    pub course_id: i32,
    pub title: String,
    pub credits: i32,
    pub department_id: i32,
    pub teaching_material_image_path: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateCourse {
    pub title: String,
    pub credits: i32,
    pub department_id: i32,
    pub teaching_material_image_path: Option<String>,
}

impl NewCourse {
    pub fn validate(self) -> Result<Course, AppError> {
        let title = validate_title(&self.title)?;
        validate_credits(self.credits)?;
        Ok(Course {
            course_id: self.course_id,
            title,
            credits: self.credits,
            department_id: self.department_id,
            teaching_material_image_path: self.teaching_material_image_path,
        })
    }
}

impl UpdateCourse {
    pub fn validate(self, course_id: i32) -> Result<Course, AppError> {
        let title = validate_title(&self.title)?;
        validate_credits(self.credits)?;
        Ok(Course {
            course_id,
            title,
            credits: self.credits,
            department_id: self.department_id,
            teaching_material_image_path: self.teaching_material_image_path,
        })
    }
}

fn validate_title(raw: &str) -> Result<String, AppError> {
    let title = raw.trim();
    let len = title.chars().count();
    if !(TITLE_MIN_LEN..=TITLE_MAX_LEN).contains(&len) {
        return Err(AppError::Validation(format!(
            "title must be between {} and {} characters",
            TITLE_MIN_LEN, TITLE_MAX_LEN
        )));
    }
    Ok(title.to_string())
}

fn validate_credits(credits: i32) -> Result<(), AppError> {
    if !(0..=MAX_CREDITS).contains(&credits) {
        return Err(AppError::Validation(format!(
            "credits must be between 0 and {}",
            MAX_CREDITS
        )));
    }
    Ok(())
}
