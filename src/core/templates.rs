//! Default course templates
//!
//! When a semester is selected for the first time it is pre-populated with a
//! course list taken from a static table keyed by semester. The table ships
//! embedded in the binary and can be replaced by a TOML file of the same
//! shape:
//!
//! ```toml
//! [[Y1S1]]
//! name = "Applied Chemistry"
//! credits = 3.0
//! ```

use crate::core::error::TemplateError;
use crate::core::models::{course::next_course_id, Course, SemesterKey};
use crate::core::validation::MAX_COURSE_CREDITS;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Built-in template table
const DEFAULT_TEMPLATES: &str = include_str!("../assets/DefaultCourseTemplates.toml");

/// One course in a template: a name and a credit weight, no grade
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TemplateCourse {
    /// Course name
    pub name: String,
    /// Credit weight (0 marks a non-credit course)
    pub credits: f64,
}

/// Template course lists keyed by semester
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CourseTemplates {
    by_semester: BTreeMap<SemesterKey, Vec<TemplateCourse>>,
}

impl CourseTemplates {
    /// A table with no templates; selected semesters start empty
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// The embedded default table
    ///
    /// # Panics
    /// Panics if the embedded table is invalid. It is compiled into the binary
    /// and covered by tests.
    #[must_use]
    pub fn builtin() -> Self {
        Self::from_toml(DEFAULT_TEMPLATES).expect("Failed to parse compiled-in course templates")
    }

    /// Parse a template table from TOML
    ///
    /// # Errors
    /// Returns an error if the TOML is malformed, a table name is not a
    /// semester key, or a course has an empty name or credits outside `[0, 10]`.
    pub fn from_toml(toml_str: &str) -> Result<Self, TemplateError> {
        let raw: BTreeMap<String, Vec<TemplateCourse>> = toml::from_str(toml_str)?;

        let mut by_semester = BTreeMap::new();
        for (key_str, courses) in raw {
            let key: SemesterKey = key_str.parse()?;
            for course in &courses {
                check_course(&key_str, course)?;
            }
            by_semester.insert(key, courses);
        }

        Ok(Self { by_semester })
    }

    /// Load a template table from a TOML file
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, TemplateError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Template courses for `key` (empty if there is no template)
    #[must_use]
    pub fn courses_for(&self, key: SemesterKey) -> &[TemplateCourse] {
        self.by_semester.get(&key).map(Vec::as_slice).unwrap_or_default()
    }

    /// Semesters that have a template, in order
    pub fn keys(&self) -> impl Iterator<Item = SemesterKey> + '_ {
        self.by_semester.keys().copied()
    }

    /// Build fresh, ungraded courses for `key` from its template
    #[must_use]
    pub fn instantiate(&self, key: SemesterKey) -> Vec<Course> {
        let mut courses = Vec::new();
        for template in self.courses_for(key) {
            let id = next_course_id(key, &template.name, &courses);
            courses.push(Course::new(id, template.name.clone(), template.credits, 0.0));
        }
        courses
    }
}

fn check_course(key: &str, course: &TemplateCourse) -> Result<(), TemplateError> {
    let reason = if course.name.trim().is_empty() {
        Some("name is empty".to_string())
    } else if !course.credits.is_finite() || !(0.0..=MAX_COURSE_CREDITS).contains(&course.credits)
    {
        Some(format!(
            "credits must be between 0 and {MAX_COURSE_CREDITS} (got {})",
            course.credits
        ))
    } else {
        None
    };

    reason.map_or(Ok(()), |reason| {
        Err(TemplateError::Course {
            key: key.to_string(),
            name: course.name.clone(),
            reason,
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(year: u32, sem: u8) -> SemesterKey {
        SemesterKey::new(year, sem).unwrap()
    }

    #[test]
    fn test_builtin_templates_parse() {
        let templates = CourseTemplates::builtin();
        let keys: Vec<String> = templates.keys().map(|k| k.to_string()).collect();
        assert_eq!(keys, vec!["Y1S1", "Y1S2", "Y2S1", "Y2S2", "Y3S1", "Y3S2", "Y4S1"]);
        assert_eq!(templates.courses_for(key(1, 1)).len(), 9);
        assert!(templates.courses_for(key(4, 2)).is_empty());
    }

    #[test]
    fn test_builtin_first_semester_credits() {
        let templates = CourseTemplates::builtin();
        let total: f64 = templates.courses_for(key(1, 1)).iter().map(|c| c.credits).sum();
        assert!((total - 19.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_instantiate_assigns_unique_ids_and_zero_grades() {
        let templates = CourseTemplates::builtin();
        let courses = templates.instantiate(key(1, 2));
        assert_eq!(courses.len(), 9);
        assert_eq!(courses[0].id, "Y1S2-mathematics-ii-0");
        assert!(courses.iter().all(|c| c.grade_point == 0.0));

        let mut ids: Vec<&str> = courses.iter().map(|c| c.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), courses.len());
    }

    #[test]
    fn test_custom_templates() {
        let toml_str = r#"
[[Y2S2]]
name = "Thesis"
credits = 6
"#;
        let templates = CourseTemplates::from_toml(toml_str).unwrap();
        let courses = templates.courses_for(key(2, 2));
        assert_eq!(courses.len(), 1);
        assert_eq!(courses[0].name, "Thesis");
        assert!((courses[0].credits - 6.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_invalid_templates_are_rejected() {
        let bad_key = "[[Year1]]\nname = \"X\"\ncredits = 3.0\n";
        assert!(matches!(
            CourseTemplates::from_toml(bad_key),
            Err(TemplateError::Key(_))
        ));

        let bad_credits = "[[Y1S1]]\nname = \"X\"\ncredits = 12.0\n";
        assert!(matches!(
            CourseTemplates::from_toml(bad_credits),
            Err(TemplateError::Course { .. })
        ));

        let bad_name = "[[Y1S1]]\nname = \"  \"\ncredits = 3.0\n";
        assert!(CourseTemplates::from_toml(bad_name).is_err());
    }
}
