//! `gpa-guru`: semester (SGPA) and cumulative (CGPA) grade point tracking
//!
//! The library holds the GPA engine, the session state machine, persistence
//! and report generation. The `guru` binary is a thin CLI over it.

pub mod core;

pub use crate::core::config;
pub use crate::core::error::{GpaError, StoreError, TemplateError, ValidationError};
pub use crate::core::gpa::{calculate_cgpa, calculate_sgpa, format_gpa, round2};
pub use crate::core::models::{
    format_semester_key, letter_to_point, point_to_letter, Course, LetterGrade, Semester,
    SemesterKey, SemesterRecord,
};
pub use crate::core::session::{HistoryEntry, NewCourse, SelectOutcome, Session};
pub use crate::core::store::{FileStore, KeyValueStore, MemoryStore};
pub use crate::core::templates::CourseTemplates;
