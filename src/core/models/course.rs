//! Course model

use super::grade::{point_to_letter, LetterGrade};
use super::semester_key::SemesterKey;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A graded course inside one semester
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    /// Identifier, unique within the owning semester
    pub id: String,

    /// Course name (e.g., "Data Structures")
    pub name: String,

    /// Credit weight (can be fractional; template placeholders may be 0)
    pub credits: f64,

    /// Grade point on the 0-10 scale
    pub grade_point: f64,
}

impl Course {
    /// Create a new course
    ///
    /// # Arguments
    /// * `id` - Identifier, unique within the semester
    /// * `name` - Course name
    /// * `credits` - Credit weight
    /// * `grade_point` - Grade point (0-10)
    #[must_use]
    pub const fn new(id: String, name: String, credits: f64, grade_point: f64) -> Self {
        Self {
            id,
            name,
            credits,
            grade_point,
        }
    }

    /// Letter grade corresponding to the grade point
    #[must_use]
    pub fn letter_grade(&self) -> LetterGrade {
        point_to_letter(self.grade_point)
    }

    /// Weighted grade points contributed to the semester average
    #[must_use]
    pub fn weighted_points(&self) -> f64 {
        self.credits * self.grade_point
    }
}

/// Lowercase `name`, collapsing every run of non-alphanumeric characters to `-`.
fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_dash = false;
    for ch in name.chars().flat_map(char::to_lowercase) {
        if ch.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(ch);
        } else {
            pending_dash = true;
        }
    }
    if slug.is_empty() {
        slug.push_str("course");
    }
    slug
}

/// Numeric suffix of a generated id (`...-<n>`), if any
fn id_sequence(id: &str) -> Option<u64> {
    id.rsplit_once('-').and_then(|(_, n)| n.parse().ok())
}

/// Build a course id of the form `<semester>-<slug>-<n>`.
///
/// `n` is one past the highest suffix already used in `existing`, so ids stay
/// unique within the semester even after deletions.
#[must_use]
pub fn next_course_id(semester: SemesterKey, name: &str, existing: &[Course]) -> String {
    let used: BTreeSet<u64> = existing.iter().filter_map(|c| id_sequence(&c.id)).collect();
    let next = match used.last() {
        None => 0,
        // Suffix space exhausted at the top: reuse the lowest free one.
        Some(&max) => max
            .checked_add(1)
            .or_else(|| (0..).find(|n| !used.contains(n)))
            .unwrap_or(0),
    };
    format!("{semester}-{}-{next}", slugify(name))
}
