//! Semester model and its persisted shape

use super::course::Course;
use super::semester_key::SemesterKey;
use crate::core::error::StoreError;
use crate::core::gpa::calculate_sgpa;
use crate::core::validation::{
    validate_grade_point, validate_manual_credits, validate_manual_sgpa, MAX_COURSE_CREDITS,
};
use logger::warn;
use serde::{Deserialize, Serialize};

/// How a semester's SGPA is obtained
#[derive(Debug, Clone, PartialEq)]
pub enum SemesterRecord {
    /// SGPA and credits are derived from the course list on every read
    Computed {
        /// Courses in insertion order
        courses: Vec<Course>,
    },
    /// SGPA and credits were entered directly; there are no courses
    Manual {
        /// Entered SGPA (0-10)
        sgpa: f64,
        /// Entered credit load
        total_credits: f64,
    },
}

/// One semester of study
#[derive(Debug, Clone, PartialEq)]
pub struct Semester {
    /// Semester identity
    pub key: SemesterKey,
    /// Course list or manual entry
    pub record: SemesterRecord,
}

impl Semester {
    /// Create a computed semester with no courses
    #[must_use]
    pub const fn empty(key: SemesterKey) -> Self {
        Self::with_courses(key, Vec::new())
    }

    /// Create a computed semester from a course list
    #[must_use]
    pub const fn with_courses(key: SemesterKey, courses: Vec<Course>) -> Self {
        Self {
            key,
            record: SemesterRecord::Computed { courses },
        }
    }

    /// Create a manually entered semester
    #[must_use]
    pub const fn manual(key: SemesterKey, sgpa: f64, total_credits: f64) -> Self {
        Self {
            key,
            record: SemesterRecord::Manual {
                sgpa,
                total_credits,
            },
        }
    }

    /// Whether the SGPA was entered manually
    #[must_use]
    pub const fn is_manual(&self) -> bool {
        matches!(self.record, SemesterRecord::Manual { .. })
    }

    /// Courses of a computed semester (empty for manual ones)
    #[must_use]
    pub fn courses(&self) -> &[Course] {
        match &self.record {
            SemesterRecord::Computed { courses } => courses,
            SemesterRecord::Manual { .. } => &[],
        }
    }

    /// Semester GPA, or `None` when no average is defined yet
    #[must_use]
    pub fn sgpa(&self) -> Option<f64> {
        match &self.record {
            SemesterRecord::Computed { courses } => calculate_sgpa(courses),
            SemesterRecord::Manual { sgpa, .. } => Some(*sgpa),
        }
    }

    /// Total credit load
    #[must_use]
    pub fn total_credits(&self) -> f64 {
        match &self.record {
            SemesterRecord::Computed { courses } => courses.iter().map(|c| c.credits).sum(),
            SemesterRecord::Manual { total_credits, .. } => *total_credits,
        }
    }

    /// Whether this semester counts towards the CGPA
    #[must_use]
    pub fn contributes(&self) -> bool {
        self.sgpa().is_some() && self.total_credits() > 0.0
    }

    /// Find a course by id
    #[must_use]
    pub fn course(&self, id: &str) -> Option<&Course> {
        self.courses().iter().find(|c| c.id == id)
    }
}

/// Persisted shape of a semester (one value in the semesters JSON object)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SemesterDetails {
    /// Semester key, e.g. `"Y1S1"`
    pub id: String,
    /// Year of study
    pub year: u32,
    /// Semester within the year
    pub semester_in_year: u8,
    /// Courses (always empty for manual semesters)
    #[serde(default)]
    pub courses: Vec<Course>,
    /// SGPA, `null` when undefined
    pub sgpa: Option<f64>,
    /// Total credit load
    #[serde(default)]
    pub total_credits: f64,
    /// Whether SGPA and credits were entered manually
    #[serde(default)]
    pub is_manual: bool,
}

impl From<&Semester> for SemesterDetails {
    fn from(semester: &Semester) -> Self {
        Self {
            id: semester.key.to_string(),
            year: semester.key.year(),
            semester_in_year: semester.key.semester_in_year(),
            courses: semester.courses().to_vec(),
            sgpa: semester.sgpa(),
            total_credits: semester.total_credits(),
            is_manual: semester.is_manual(),
        }
    }
}

impl TryFrom<SemesterDetails> for Semester {
    type Error = StoreError;

    /// Rebuild a semester from its stored shape.
    ///
    /// Derived values of computed semesters are recomputed, never trusted.
    fn try_from(details: SemesterDetails) -> Result<Self, Self::Error> {
        let key = SemesterKey::new(details.year, details.semester_in_year).map_err(|e| {
            StoreError::InvalidRecord {
                key: details.id.clone(),
                reason: e.to_string(),
            }
        })?;
        if details.id != key.to_string() {
            warn!(
                "Stored semester id '{}' does not match year/semester {key}; using {key}",
                details.id
            );
        }

        let invalid = |reason: String| StoreError::InvalidRecord {
            key: key.to_string(),
            reason,
        };

        if !details.is_manual {
            for course in &details.courses {
                check_stored_course(course).map_err(invalid)?;
            }
            return Ok(Self::with_courses(key, details.courses));
        }

        let sgpa = details
            .sgpa
            .ok_or_else(|| invalid("manual semester without an SGPA".to_string()))?;
        let sgpa = validate_manual_sgpa(sgpa).map_err(|e| invalid(e.to_string()))?;
        let total_credits =
            validate_manual_credits(details.total_credits).map_err(|e| invalid(e.to_string()))?;
        if !details.courses.is_empty() {
            warn!(
                "Manual semester {key} has {} stored courses; discarding them",
                details.courses.len()
            );
        }
        Ok(Self::manual(key, sgpa, total_credits))
    }
}

/// Range checks for a stored course. Zero credits are accepted for template
/// placeholders.
fn check_stored_course(course: &Course) -> Result<(), String> {
    validate_grade_point(course.grade_point)
        .map_err(|e| format!("course '{}': {e}", course.id))?;
    if !course.credits.is_finite() || !(0.0..=MAX_COURSE_CREDITS).contains(&course.credits) {
        return Err(format!(
            "course '{}': credits must be between 0 and {MAX_COURSE_CREDITS} (got {})",
            course.id, course.credits
        ));
    }
    Ok(())
}
