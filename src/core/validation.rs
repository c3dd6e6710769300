//! Input validation applied before any session state changes

use crate::core::error::ValidationError;

/// Minimum course name length, in characters, after trimming
pub const MIN_COURSE_NAME_LEN: usize = 2;
/// Smallest credit weight a user may enter for a course
pub const MIN_COURSE_CREDITS: f64 = 0.5;
/// Largest credit weight a user may enter for a course
pub const MAX_COURSE_CREDITS: f64 = 10.0;
/// Highest grade point on the scale
pub const MAX_GRADE_POINT: f64 = 10.0;
/// Smallest credit load for a manually entered semester
pub const MIN_MANUAL_CREDITS: f64 = 0.5;
/// Largest credit load for a manually entered semester
pub const MAX_MANUAL_CREDITS: f64 = 100.0;

fn in_range(value: f64, min: f64, max: f64) -> bool {
    value.is_finite() && (min..=max).contains(&value)
}

/// Validate a course name and return it trimmed
///
/// # Errors
/// Returns [`ValidationError::CourseName`] if the trimmed name is too short.
pub fn validate_course_name(name: &str) -> Result<String, ValidationError> {
    let trimmed = name.trim();
    if trimmed.chars().count() < MIN_COURSE_NAME_LEN {
        return Err(ValidationError::CourseName {
            name: name.to_string(),
            min: MIN_COURSE_NAME_LEN,
        });
    }
    Ok(trimmed.to_string())
}

/// Validate user-entered course credits
///
/// # Errors
/// Returns [`ValidationError::Credits`] outside `[0.5, 10]` or for non-finite input.
pub fn validate_course_credits(credits: f64) -> Result<f64, ValidationError> {
    if in_range(credits, MIN_COURSE_CREDITS, MAX_COURSE_CREDITS) {
        Ok(credits)
    } else {
        Err(ValidationError::Credits {
            value: credits,
            min: MIN_COURSE_CREDITS,
            max: MAX_COURSE_CREDITS,
        })
    }
}

/// Validate a grade point
///
/// # Errors
/// Returns [`ValidationError::GradePoint`] outside `[0, 10]` or for non-finite input.
pub fn validate_grade_point(point: f64) -> Result<f64, ValidationError> {
    if in_range(point, 0.0, MAX_GRADE_POINT) {
        Ok(point)
    } else {
        Err(ValidationError::GradePoint(point))
    }
}

/// Validate a manually entered SGPA
///
/// # Errors
/// Returns [`ValidationError::Sgpa`] outside `[0, 10]` or for non-finite input.
pub fn validate_manual_sgpa(sgpa: f64) -> Result<f64, ValidationError> {
    if in_range(sgpa, 0.0, MAX_GRADE_POINT) {
        Ok(sgpa)
    } else {
        Err(ValidationError::Sgpa(sgpa))
    }
}

/// Validate a manually entered semester credit load
///
/// # Errors
/// Returns [`ValidationError::Credits`] outside `[0.5, 100]` or for non-finite input.
pub fn validate_manual_credits(credits: f64) -> Result<f64, ValidationError> {
    if in_range(credits, MIN_MANUAL_CREDITS, MAX_MANUAL_CREDITS) {
        Ok(credits)
    } else {
        Err(ValidationError::Credits {
            value: credits,
            min: MIN_MANUAL_CREDITS,
            max: MAX_MANUAL_CREDITS,
        })
    }
}
