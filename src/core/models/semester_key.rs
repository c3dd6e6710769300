//! Semester key (`Y<year>S<semester>`) and its human-readable label

use crate::core::error::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifies one semester of study: the year and the semester within it.
///
/// Ordering is by year, then semester, which is the order semesters are
/// displayed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SemesterKey {
    year: u32,
    semester_in_year: u8,
}

impl SemesterKey {
    /// Create a key for `year` (1-based) and `semester_in_year` (1 or 2)
    ///
    /// # Errors
    /// Returns a [`ValidationError`] if the year is 0 or the semester is not 1 or 2.
    pub fn new(year: u32, semester_in_year: u8) -> Result<Self, ValidationError> {
        if year == 0 {
            return Err(ValidationError::Year(year));
        }
        if semester_in_year != 1 && semester_in_year != 2 {
            return Err(ValidationError::SemesterInYear(semester_in_year));
        }
        Ok(Self {
            year,
            semester_in_year,
        })
    }

    /// Year of study
    #[must_use]
    pub const fn year(&self) -> u32 {
        self.year
    }

    /// Semester within the year (1 or 2)
    #[must_use]
    pub const fn semester_in_year(&self) -> u8 {
        self.semester_in_year
    }

    /// Human-readable label, e.g. `"Year 3, Semester 2"`
    #[must_use]
    pub fn label(&self) -> String {
        format!("Year {}, Semester {}", self.year, self.semester_in_year)
    }
}

impl fmt::Display for SemesterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Y{}S{}", self.year, self.semester_in_year)
    }
}

impl FromStr for SemesterKey {
    type Err = ValidationError;

    /// Parse the canonical form (`Y1S2`, case-insensitive, surrounding
    /// whitespace ignored).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ValidationError::SemesterKey(s.to_string());
        let upper = s.trim().to_ascii_uppercase();
        let rest = upper.strip_prefix('Y').ok_or_else(invalid)?;
        let (year, semester) = rest.split_once('S').ok_or_else(invalid)?;

        let all_digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
        if !all_digits(year) || !all_digits(semester) {
            return Err(invalid());
        }

        let year: u32 = year.parse().map_err(|_| invalid())?;
        let semester: u8 = semester.parse().map_err(|_| invalid())?;
        Self::new(year, semester)
    }
}

impl TryFrom<String> for SemesterKey {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SemesterKey> for String {
    fn from(key: SemesterKey) -> Self {
        key.to_string()
    }
}

/// Format an arbitrary semester key string for display.
///
/// Looks for the first `Y<digits>` and the first `S<digits>` in `key`. When
/// both are present the result is `"Year <y>, Semester <s>"` with the digits
/// copied verbatim; otherwise `key` is returned unchanged.
#[must_use]
pub fn format_semester_key(key: &str) -> String {
    match (digits_after(key, 'Y'), digits_after(key, 'S')) {
        (Some(year), Some(semester)) => format!("Year {year}, Semester {semester}"),
        _ => key.to_string(),
    }
}

/// First run of ASCII digits immediately following `marker` in `text`.
fn digits_after(text: &str, marker: char) -> Option<&str> {
    text.match_indices(marker).find_map(|(idx, _)| {
        let tail = &text[idx + marker.len_utf8()..];
        let len = tail.bytes().take_while(u8::is_ascii_digit).count();
        (len > 0).then(|| &tail[..len])
    })
}
