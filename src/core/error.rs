//! Error types for the GPA engine, the session and the persistent store

use super::models::SemesterKey;
use thiserror::Error;

/// Input rejected at the validation boundary. No state is changed when one of
/// these is returned.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Course names must have at least two characters
    #[error("Course name must be at least {min} characters long (got '{name}')")]
    CourseName {
        /// Offending name
        name: String,
        /// Minimum accepted length
        min: usize,
    },
    /// Credits outside the accepted range
    #[error("Credits must be between {min} and {max} (got {value})")]
    Credits {
        /// Offending value
        value: f64,
        /// Lower bound (inclusive)
        min: f64,
        /// Upper bound (inclusive)
        max: f64,
    },
    /// Grade point outside `[0, 10]`
    #[error("Grade point must be between 0 and 10 (got {0})")]
    GradePoint(f64),
    /// Manually entered SGPA outside `[0, 10]`
    #[error("SGPA must be between 0 and 10 (got {0})")]
    Sgpa(f64),
    /// Letter grade not on the grade scale
    #[error("Unknown letter grade: '{0}'")]
    LetterGrade(String),
    /// Semester key not of the form `Y<year>S<semester>`
    #[error("Invalid semester key: '{0}' (expected e.g. Y1S2)")]
    SemesterKey(String),
    /// Year must be a positive integer
    #[error("Year must be a positive integer (got {0})")]
    Year(u32),
    /// Semester within a year must be 1 or 2
    #[error("Semester in year must be 1 or 2 (got {0})")]
    SemesterInYear(u8),
}

/// Failures reading from or writing to the key-value store
#[derive(Debug, Error)]
pub enum StoreError {
    /// Underlying I/O failure
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// Stored value is not valid JSON for the expected shape
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    /// Stored record violates a model invariant
    #[error("Invalid stored record '{key}': {reason}")]
    InvalidRecord {
        /// Store entry or semester key
        key: String,
        /// What was wrong with it
        reason: String,
    },
}

/// Main error type for session operations
#[derive(Debug, Error)]
pub enum GpaError {
    /// Input failed validation
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// Manual SGPA entry collides with existing data for the semester
    #[error("Data for {} already exists; use an explicit override to replace it", .0.label())]
    ManualEntryConflict(SemesterKey),
    /// Course editing attempted on a manually entered semester
    #[error("SGPA for {} was entered manually; course editing is disabled", .0.label())]
    ManualSemester(SemesterKey),
    /// No record exists for the semester
    #[error("No data for {}; select it first", .0.label())]
    UnknownSemester(SemesterKey),
    /// No course with this id in the semester
    #[error("No course '{id}' in {}", .semester.label())]
    UnknownCourse {
        /// Semester searched
        semester: SemesterKey,
        /// Requested course id
        id: String,
    },
    /// Operation needs a selected semester
    #[error("No semester selected")]
    NoSemesterSelected,
    /// Persistent store failure
    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),
}

/// Failures loading a default course template table
#[derive(Debug, Error)]
pub enum TemplateError {
    /// Template file could not be read
    #[error("Failed to read course templates: {0}")]
    Io(#[from] std::io::Error),
    /// Template file is not valid TOML for the expected shape
    #[error("Failed to parse course templates: {0}")]
    Toml(#[from] toml::de::Error),
    /// A table name is not a semester key
    #[error("Invalid template table: {0}")]
    Key(#[from] ValidationError),
    /// A template course has an unusable name or credit weight
    #[error("Invalid template course '{name}' in {key}: {reason}")]
    Course {
        /// Semester table the course is in
        key: String,
        /// Course name as written
        name: String,
        /// What was wrong with it
        reason: String,
    },
}
