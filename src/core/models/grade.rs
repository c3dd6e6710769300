//! Letter grade scale (10-point)

use crate::core::error::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lower thresholds used when a grade point is not an exact table value
const BANDS: [(f64, LetterGrade); 6] = [
    (10.0, LetterGrade::APlus),
    (9.0, LetterGrade::A),
    (8.0, LetterGrade::B),
    (7.0, LetterGrade::C),
    (6.0, LetterGrade::D),
    (5.0, LetterGrade::E),
];

/// A letter grade on the fixed 10-point scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LetterGrade {
    /// Outstanding (10)
    #[serde(rename = "A+")]
    APlus,
    /// Excellent (9)
    A,
    /// Very good (8)
    B,
    /// Good (7)
    C,
    /// Average (6)
    D,
    /// Pass (5)
    E,
    /// Fail (0)
    F,
}

impl LetterGrade {
    /// Every grade, highest first
    pub const ALL: [Self; 7] = [
        Self::APlus,
        Self::A,
        Self::B,
        Self::C,
        Self::D,
        Self::E,
        Self::F,
    ];

    /// Grade point for this letter
    #[must_use]
    pub const fn points(self) -> u8 {
        match self {
            Self::APlus => 10,
            Self::A => 9,
            Self::B => 8,
            Self::C => 7,
            Self::D => 6,
            Self::E => 5,
            Self::F => 0,
        }
    }

    /// Grade point as used in averages
    #[must_use]
    pub fn grade_point(self) -> f64 {
        f64::from(self.points())
    }

    /// Letter as printed (e.g. `"A+"`)
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::APlus => "A+",
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
            Self::E => "E",
            Self::F => "F",
        }
    }
}

impl fmt::Display for LetterGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LetterGrade {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|g| g.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ValidationError::LetterGrade(s.to_string()))
    }
}

/// Resolve a letter to its grade point.
///
/// Unknown letters resolve to the lowest grade (0). Callers that need to tell
/// the user about a typo should parse with [`LetterGrade::from_str`] instead.
#[must_use]
pub fn letter_to_point(letter: &str) -> f64 {
    letter
        .parse::<LetterGrade>()
        .map_or(0.0, LetterGrade::grade_point)
}

/// Map a grade point back to a letter.
///
/// Exact table values map to their letter. Anything else falls into the
/// highest band whose threshold does not exceed `point`.
#[must_use]
#[allow(clippy::float_cmp)]
pub fn point_to_letter(point: f64) -> LetterGrade {
    if let Some(exact) = LetterGrade::ALL
        .into_iter()
        .find(|g| g.grade_point() == point)
    {
        return exact;
    }
    BANDS
        .into_iter()
        .find(|(threshold, _)| point >= *threshold)
        .map_or(LetterGrade::F, |(_, grade)| grade)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letter_points() {
        let points: Vec<u8> = LetterGrade::ALL.iter().map(|g| g.points()).collect();
        assert_eq!(points, vec![10, 9, 8, 7, 6, 5, 0]);
    }

    #[test]
    fn test_letter_to_point_known_and_unknown() {
        assert!((letter_to_point("A+") - 10.0).abs() < f64::EPSILON);
        assert!((letter_to_point("B") - 8.0).abs() < f64::EPSILON);
        assert!(letter_to_point("Z").abs() < f64::EPSILON);
        assert!(letter_to_point("").abs() < f64::EPSILON);
    }

    #[test]
    fn test_round_trip_for_table_values() {
        for grade in LetterGrade::ALL {
            assert_eq!(point_to_letter(letter_to_point(grade.as_str())), grade);
            let p = grade.grade_point();
            assert!((letter_to_point(point_to_letter(p).as_str()) - p).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn test_band_fallback() {
        assert_eq!(point_to_letter(9.5), LetterGrade::A);
        assert_eq!(point_to_letter(8.67), LetterGrade::B);
        assert_eq!(point_to_letter(5.01), LetterGrade::E);
        assert_eq!(point_to_letter(4.99), LetterGrade::F);
        assert_eq!(point_to_letter(12.0), LetterGrade::APlus);
        assert_eq!(point_to_letter(-1.0), LetterGrade::F);
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("a+".parse::<LetterGrade>(), Ok(LetterGrade::APlus));
        assert_eq!(" c ".parse::<LetterGrade>(), Ok(LetterGrade::C));
        assert!("G".parse::<LetterGrade>().is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(LetterGrade::APlus.to_string(), "A+");
        assert_eq!(LetterGrade::F.to_string(), "F");
    }
}
