//! Data models for `Guru`

pub mod course;
pub mod grade;
pub mod semester;
pub mod semester_key;

pub use course::Course;
pub use grade::{letter_to_point, point_to_letter, LetterGrade};
pub use semester::{Semester, SemesterDetails, SemesterRecord};
pub use semester_key::{format_semester_key, SemesterKey};
