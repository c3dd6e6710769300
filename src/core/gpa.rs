//! SGPA and CGPA calculation
//!
//! Both averages are credit-weighted and rounded to two decimals. They are
//! pure functions over the current data and are recomputed from scratch on
//! every call; nothing here caches or patches a previous result.

use crate::core::models::{Course, Semester};
use std::fmt;

/// Round to two decimals, halves away from zero.
#[must_use]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Semester GPA of a course list.
///
/// Returns `None` when the list is empty or its credits sum to zero: the
/// average of nothing is undefined rather than zero.
#[allow(clippy::float_cmp)]
#[must_use]
pub fn calculate_sgpa(courses: &[Course]) -> Option<f64> {
    if courses.is_empty() {
        return None;
    }

    let (points, credits) = courses.iter().fold((0.0, 0.0), |(points, credits), c| {
        (points + c.weighted_points(), credits + c.credits)
    });

    if credits == 0.0 {
        return None;
    }
    Some(round2(points / credits))
}

/// Cumulative GPA over a collection of semesters.
///
/// Only semesters with an SGPA and a positive credit load contribute; manual
/// and computed semesters are treated alike. Returns `None` if none contribute.
#[allow(clippy::float_cmp)]
#[must_use]
pub fn calculate_cgpa<'a, I>(semesters: I) -> Option<f64>
where
    I: IntoIterator<Item = &'a Semester>,
{
    let (points, credits) = semesters
        .into_iter()
        .filter_map(|s| {
            let credits = s.total_credits();
            s.sgpa()
                .filter(|_| credits > 0.0)
                .map(|sgpa| (sgpa * credits, credits))
        })
        .fold((0.0, 0.0), |(p, c), (sp, sc)| (p + sp, c + sc));

    if credits == 0.0 {
        return None;
    }
    Some(round2(points / credits))
}

/// SGPA expressed as a percentage (SGPA × 10), rounded to one decimal.
#[must_use]
pub fn percentage(sgpa: f64) -> f64 {
    (sgpa * 100.0).round() / 10.0
}

/// Encouragement band shown next to a semester's percentage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PerformanceBand {
    /// No grades yet (no percentage, or 0%)
    NotStarted,
    /// 90% and above
    Outstanding,
    /// 80% to below 90%
    Excellent,
    /// 70% to below 80%
    Great,
    /// 60% to below 70%
    Good,
    /// 50% to below 60%
    Progressing,
    /// Below 50%
    NeedsFocus,
}

impl PerformanceBand {
    /// Band for an optional percentage
    #[allow(clippy::float_cmp)]
    #[must_use]
    pub fn from_percentage(percentage: Option<f64>) -> Self {
        match percentage {
            None => Self::NotStarted,
            Some(p) if p == 0.0 => Self::NotStarted,
            Some(p) if p >= 90.0 => Self::Outstanding,
            Some(p) if p >= 80.0 => Self::Excellent,
            Some(p) if p >= 70.0 => Self::Great,
            Some(p) if p >= 60.0 => Self::Good,
            Some(p) if p >= 50.0 => Self::Progressing,
            Some(_) => Self::NeedsFocus,
        }
    }

    /// Band for an optional SGPA
    #[must_use]
    pub fn from_sgpa(sgpa: Option<f64>) -> Self {
        Self::from_percentage(sgpa.map(percentage))
    }

    /// Message shown to the student
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::NotStarted => "Enter grades to see your performance!",
            Self::Outstanding => "Congrats Topper! Outstanding Performance!",
            Self::Excellent => "Way to Go! Excellent Work!",
            Self::Great => "Great Job! Keep it Up!",
            Self::Good => "Good Effort! You're Doing Well!",
            Self::Progressing => "Making Progress! Keep Pushing!",
            Self::NeedsFocus => "Stay Focused! Every Step Counts!",
        }
    }
}

impl fmt::Display for PerformanceBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Format an optional average with two decimals, or `N/A`
#[must_use]
pub fn format_gpa(value: Option<f64>) -> String {
    value.map_or_else(|| "N/A".to_string(), |v| format!("{v:.2}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::SemesterKey;

    fn course(credits: f64, gp: f64) -> Course {
        Course::new(String::new(), "Course".to_string(), credits, gp)
    }

    fn key(year: u32, sem: u8) -> SemesterKey {
        SemesterKey::new(year, sem).unwrap()
    }

    #[test]
    fn test_sgpa_undefined_for_empty_or_zero_credit() {
        assert_eq!(calculate_sgpa(&[]), None);
        assert_eq!(calculate_sgpa(&[course(0.0, 9.0), course(0.0, 10.0)]), None);
    }

    #[test]
    fn test_sgpa_weighted_mean() {
        // (3*9 + 1.5*8) / 4.5 = 8.666...
        assert_eq!(calculate_sgpa(&[course(3.0, 9.0), course(1.5, 8.0)]), Some(8.67));
        assert_eq!(calculate_sgpa(&[course(4.0, 10.0)]), Some(10.0));
        assert_eq!(calculate_sgpa(&[course(3.0, 0.0)]), Some(0.0));
    }

    #[test]
    fn test_zero_credit_course_does_not_move_average() {
        let with = calculate_sgpa(&[course(3.0, 7.0), course(0.0, 10.0)]);
        assert_eq!(with, Some(7.0));
    }

    #[test]
    fn test_sgpa_is_idempotent() {
        let courses = vec![course(3.0, 6.0), course(2.0, 9.0), course(1.5, 5.0)];
        assert_eq!(calculate_sgpa(&courses), calculate_sgpa(&courses));
    }

    #[test]
    fn test_cgpa_over_computed_and_manual() {
        let semesters = vec![
            Semester::manual(key(1, 1), 8.67, 4.5),
            Semester::manual(key(1, 2), 7.0, 20.0),
        ];
        // (8.67*4.5 + 7*20) / 24.5 = 7.3067...
        assert_eq!(calculate_cgpa(&semesters), Some(7.31));
    }

    #[test]
    fn test_cgpa_skips_non_contributing_semesters() {
        let semesters = vec![
            Semester::empty(key(1, 1)),
            Semester::with_courses(key(1, 2), vec![course(0.0, 9.0)]),
            Semester::manual(key(2, 1), 9.0, 0.0),
        ];
        assert_eq!(calculate_cgpa(&semesters), None);
    }

    #[test]
    fn test_cgpa_single_semester_matches_sgpa() {
        let semesters = vec![Semester::with_courses(
            key(2, 2),
            vec![course(3.0, 9.0), course(1.5, 8.0)],
        )];
        assert_eq!(calculate_cgpa(&semesters), Some(8.67));
    }

    #[test]
    fn test_round2_halves_away_from_zero() {
        assert!((round2(7.125) - 7.13).abs() < 1e-9);
        assert!((round2(2.004) - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_percentage_and_band() {
        assert!((percentage(8.67) - 86.7).abs() < 1e-9);
        assert_eq!(PerformanceBand::from_sgpa(Some(8.67)), PerformanceBand::Excellent);
        assert_eq!(PerformanceBand::from_sgpa(Some(9.0)), PerformanceBand::Outstanding);
        assert_eq!(PerformanceBand::from_sgpa(Some(4.9)), PerformanceBand::NeedsFocus);
        assert_eq!(PerformanceBand::from_sgpa(Some(0.0)), PerformanceBand::NotStarted);
        assert_eq!(PerformanceBand::from_sgpa(None), PerformanceBand::NotStarted);
    }

    #[test]
    fn test_format_gpa() {
        assert_eq!(format_gpa(Some(7.0)), "7.00");
        assert_eq!(format_gpa(None), "N/A");
    }
}
