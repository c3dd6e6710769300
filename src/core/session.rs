//! Session state: the semester collection, the selected semester, and every
//! operation that changes them.
//!
//! A semester moves through these states:
//!
//! - *unselected*: no record exists;
//! - *selected-default*: first selection populated it from its template;
//! - *selected-edited*: courses were added, removed or graded;
//! - *selected-manual*: SGPA and credits were entered directly.
//!
//! Course edits are only accepted on computed semesters. A manual semester
//! only changes through [`Session::override_manual`] or [`Session::clear_manual`].

use crate::core::error::{GpaError, StoreError};
use crate::core::gpa::calculate_cgpa;
use crate::core::models::course::next_course_id;
use crate::core::models::{Course, Semester, SemesterDetails, SemesterKey, SemesterRecord};
use crate::core::store::{KeyValueStore, SELECTED_SEMESTER_KEY, SEMESTERS_KEY};
use crate::core::templates::CourseTemplates;
use crate::core::validation::{
    validate_course_credits, validate_course_name, validate_grade_point, validate_manual_credits,
    validate_manual_sgpa,
};
use logger::{debug, warn};
use std::collections::BTreeMap;

/// User input for a new course
#[derive(Debug, Clone, PartialEq)]
pub struct NewCourse {
    /// Course name (at least two characters)
    pub name: String,
    /// Credit weight in `[0.5, 10]`
    pub credits: f64,
    /// Grade point in `[0, 10]`
    pub grade_point: f64,
}

impl NewCourse {
    /// Create course input
    #[must_use]
    pub fn new(name: impl Into<String>, credits: f64, grade_point: f64) -> Self {
        Self {
            name: name.into(),
            credits,
            grade_point,
        }
    }
}

/// What happened when a semester was selected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectOutcome {
    /// The semester was (re)initialized from its template with this many courses
    Populated(usize),
    /// The semester already had data and was left as is
    Existing,
}

/// One row of the CGPA history
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    /// Semester
    pub key: SemesterKey,
    /// Credit load
    pub total_credits: f64,
    /// Semester GPA
    pub sgpa: f64,
    /// Whether the SGPA was entered manually
    pub is_manual: bool,
}

impl HistoryEntry {
    /// `"Manual"` or `"Calculated"`
    #[must_use]
    pub const fn entry_type(&self) -> &'static str {
        if self.is_manual {
            "Manual"
        } else {
            "Calculated"
        }
    }
}

/// Semester collection plus the currently selected semester
#[derive(Debug, Clone, Default)]
pub struct Session {
    semesters: BTreeMap<SemesterKey, Semester>,
    selected: Option<SemesterKey>,
    templates: CourseTemplates,
}

impl Session {
    /// Empty session using `templates` to populate newly selected semesters
    #[must_use]
    pub fn new(templates: CourseTemplates) -> Self {
        Self {
            semesters: BTreeMap::new(),
            selected: None,
            templates,
        }
    }

    /// Build a session from existing semesters (later duplicates win)
    #[must_use]
    pub fn from_parts(
        semesters: impl IntoIterator<Item = Semester>,
        selected: Option<SemesterKey>,
        templates: CourseTemplates,
    ) -> Self {
        Self {
            semesters: semesters.into_iter().map(|s| (s.key, s)).collect(),
            selected,
            templates,
        }
    }

    /// Restore a session from `store`.
    ///
    /// Missing entries mean "no prior state". Individual semester records that
    /// violate the model are skipped with a warning.
    ///
    /// # Errors
    /// Returns [`GpaError::Storage`] if an entry cannot be read or is not valid JSON.
    pub fn load(store: &impl KeyValueStore, templates: CourseTemplates) -> Result<Self, GpaError> {
        let mut session = Self::new(templates);

        if let Some(raw) = store.get(SEMESTERS_KEY)? {
            let stored: BTreeMap<String, SemesterDetails> =
                serde_json::from_str(&raw).map_err(StoreError::from)?;
            for (entry_key, details) in stored {
                match Semester::try_from(details) {
                    Ok(semester) => {
                        if entry_key != semester.key.to_string() {
                            warn!("Semester stored under '{entry_key}' is {}", semester.key);
                        }
                        session.semesters.insert(semester.key, semester);
                    }
                    Err(e) => warn!("Skipping stored semester '{entry_key}': {e}"),
                }
            }
        }

        if let Some(raw) = store.get(SELECTED_SEMESTER_KEY)? {
            match serde_json::from_str::<SemesterKey>(&raw) {
                Ok(key) => session.selected = Some(key),
                Err(e) => warn!("Ignoring stored semester selection: {e}"),
            }
        }

        debug!(
            "Loaded {} semester(s), selected: {:?}",
            session.semesters.len(),
            session.selected.map(|k| k.to_string())
        );
        Ok(session)
    }

    /// Persist the semester collection and the selection to `store`.
    ///
    /// The in-memory session is unaffected by a failure.
    ///
    /// # Errors
    /// Returns [`GpaError::Storage`] if serialization or a write fails.
    pub fn save(&self, store: &mut impl KeyValueStore) -> Result<(), GpaError> {
        let details: BTreeMap<String, SemesterDetails> = self
            .semesters
            .values()
            .map(|s| (s.key.to_string(), SemesterDetails::from(s)))
            .collect();
        let json = serde_json::to_string_pretty(&details).map_err(StoreError::from)?;
        store.set(SEMESTERS_KEY, &json)?;

        match self.selected {
            Some(key) => {
                let json = serde_json::to_string(&key).map_err(StoreError::from)?;
                store.set(SELECTED_SEMESTER_KEY, &json)?;
            }
            None => store.remove(SELECTED_SEMESTER_KEY)?,
        }

        debug!("Saved {} semester(s)", self.semesters.len());
        Ok(())
    }

    /// Template table used for new selections
    #[must_use]
    pub const fn templates(&self) -> &CourseTemplates {
        &self.templates
    }

    /// Currently selected semester key
    #[must_use]
    pub const fn selected(&self) -> Option<SemesterKey> {
        self.selected
    }

    /// Record for the currently selected semester
    #[must_use]
    pub fn selected_semester(&self) -> Option<&Semester> {
        self.selected.and_then(|key| self.semesters.get(&key))
    }

    /// Record for `key`
    #[must_use]
    pub fn semester(&self, key: SemesterKey) -> Option<&Semester> {
        self.semesters.get(&key)
    }

    /// All semesters, ordered by year then semester
    pub fn semesters(&self) -> impl Iterator<Item = &Semester> {
        self.semesters.values()
    }

    /// Number of semesters with a record
    #[must_use]
    pub fn len(&self) -> usize {
        self.semesters.len()
    }

    /// Whether no semester has a record
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.semesters.is_empty()
    }

    /// Select `key`, populating it from its template when it has no data.
    ///
    /// A semester is populated when it has no record, or when it is a computed
    /// semester with no courses. Manual semesters are never touched.
    pub fn select(&mut self, key: SemesterKey) -> SelectOutcome {
        self.selected = Some(key);

        let needs_init = match self.semesters.get(&key).map(|s| &s.record) {
            None => true,
            Some(SemesterRecord::Computed { courses }) => courses.is_empty(),
            Some(SemesterRecord::Manual { .. }) => false,
        };
        if !needs_init {
            debug!("Selected {key} (existing data)");
            return SelectOutcome::Existing;
        }

        let courses = self.templates.instantiate(key);
        let count = courses.len();
        self.semesters.insert(key, Semester::with_courses(key, courses));
        debug!("Selected {key}; populated {count} template course(s)");
        SelectOutcome::Populated(count)
    }

    /// Select the semester given by its string key
    ///
    /// # Errors
    /// Returns [`GpaError::Validation`] if `key` is not a valid semester key.
    pub fn select_str(&mut self, key: &str) -> Result<SelectOutcome, GpaError> {
        Ok(self.select(key.parse()?))
    }

    /// Key of the selected semester, or an error if none is selected
    ///
    /// # Errors
    /// Returns [`GpaError::NoSemesterSelected`] when nothing is selected.
    pub fn require_selected(&self) -> Result<SemesterKey, GpaError> {
        self.selected.ok_or(GpaError::NoSemesterSelected)
    }

    /// Courses of a computed semester, for mutation
    fn editable_courses(&mut self, key: SemesterKey) -> Result<&mut Vec<Course>, GpaError> {
        match self.semesters.get_mut(&key).map(|s| &mut s.record) {
            None => Err(GpaError::UnknownSemester(key)),
            Some(SemesterRecord::Manual { .. }) => Err(GpaError::ManualSemester(key)),
            Some(SemesterRecord::Computed { courses }) => Ok(courses),
        }
    }

    /// Add a course to a computed semester
    ///
    /// # Errors
    /// Returns a validation error for bad input, [`GpaError::UnknownSemester`]
    /// if `key` has no record and [`GpaError::ManualSemester`] if it is manual.
    pub fn add_course(&mut self, key: SemesterKey, input: NewCourse) -> Result<&Course, GpaError> {
        let name = validate_course_name(&input.name)?;
        let credits = validate_course_credits(input.credits)?;
        let grade_point = validate_grade_point(input.grade_point)?;

        let courses = self.editable_courses(key)?;
        let id = next_course_id(key, &name, courses);
        debug!("Adding course {id} ({credits} credits, {grade_point} points) to {key}");
        courses.push(Course::new(id, name, credits, grade_point));
        Ok(&courses[courses.len() - 1])
    }

    /// Remove a course from a computed semester and return it
    ///
    /// # Errors
    /// Returns [`GpaError::UnknownCourse`] if no course has `id`, plus the
    /// semester errors of [`Session::add_course`].
    pub fn remove_course(&mut self, key: SemesterKey, id: &str) -> Result<Course, GpaError> {
        let courses = self.editable_courses(key)?;
        let pos = courses
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| GpaError::UnknownCourse {
                semester: key,
                id: id.to_string(),
            })?;
        debug!("Removing course {id} from {key}");
        Ok(courses.remove(pos))
    }

    /// Change the grade point of one course
    ///
    /// # Errors
    /// Returns a validation error if `grade_point` is outside `[0, 10]` (the
    /// course is left unchanged), plus the errors of [`Session::remove_course`].
    pub fn update_grade(
        &mut self,
        key: SemesterKey,
        id: &str,
        grade_point: f64,
    ) -> Result<(), GpaError> {
        let grade_point = validate_grade_point(grade_point)?;
        let course = self
            .editable_courses(key)?
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| GpaError::UnknownCourse {
                semester: key,
                id: id.to_string(),
            })?;
        debug!("Grade of {id} in {key}: {} -> {grade_point}", course.grade_point);
        course.grade_point = grade_point;
        Ok(())
    }

    /// Record a manually entered SGPA for a semester without course data.
    ///
    /// Allowed when the semester has no record or is a computed semester with
    /// no courses.
    ///
    /// # Errors
    /// Returns a validation error for out-of-range values and
    /// [`GpaError::ManualEntryConflict`] if the semester is already manual or
    /// has courses; the existing data is left unchanged.
    pub fn enter_manual(
        &mut self,
        key: SemesterKey,
        sgpa: f64,
        total_credits: f64,
    ) -> Result<(), GpaError> {
        let sgpa = validate_manual_sgpa(sgpa)?;
        let total_credits = validate_manual_credits(total_credits)?;

        if let Some(existing) = self.semesters.get(&key) {
            if existing.is_manual() || !existing.courses().is_empty() {
                return Err(GpaError::ManualEntryConflict(key));
            }
        }

        debug!("Manual SGPA {sgpa} over {total_credits} credits for {key}");
        self.semesters.insert(key, Semester::manual(key, sgpa, total_credits));
        Ok(())
    }

    /// Replace whatever `key` holds with a manual entry
    ///
    /// # Errors
    /// Returns a validation error for out-of-range values.
    pub fn override_manual(
        &mut self,
        key: SemesterKey,
        sgpa: f64,
        total_credits: f64,
    ) -> Result<(), GpaError> {
        let sgpa = validate_manual_sgpa(sgpa)?;
        let total_credits = validate_manual_credits(total_credits)?;
        if let Some(previous) = self.semesters.get(&key) {
            debug!(
                "Overriding {key} (manual: {}, {} course(s))",
                previous.is_manual(),
                previous.courses().len()
            );
        }
        self.semesters.insert(key, Semester::manual(key, sgpa, total_credits));
        Ok(())
    }

    /// Turn a manual semester back into an empty computed one.
    ///
    /// Returns `false` if the semester was not manual. The next
    /// [`Session::select`] repopulates it from its template.
    ///
    /// # Errors
    /// Returns [`GpaError::UnknownSemester`] if `key` has no record.
    pub fn clear_manual(&mut self, key: SemesterKey) -> Result<bool, GpaError> {
        let semester = self
            .semesters
            .get_mut(&key)
            .ok_or(GpaError::UnknownSemester(key))?;
        if !semester.is_manual() {
            return Ok(false);
        }
        *semester = Semester::empty(key);
        debug!("Cleared manual entry for {key}");
        Ok(true)
    }

    /// SGPA of `key`, `None` if it has no record or no defined average
    #[must_use]
    pub fn sgpa(&self, key: SemesterKey) -> Option<f64> {
        self.semesters.get(&key).and_then(Semester::sgpa)
    }

    /// SGPA of the selected semester
    #[must_use]
    pub fn current_sgpa(&self) -> Option<f64> {
        self.selected_semester().and_then(Semester::sgpa)
    }

    /// CGPA over all semesters, recomputed from scratch
    #[must_use]
    pub fn cgpa(&self) -> Option<f64> {
        calculate_cgpa(self.semesters.values())
    }

    /// Credits of all semesters that count towards the CGPA
    #[must_use]
    pub fn counted_credits(&self) -> f64 {
        self.semesters
            .values()
            .filter(|s| s.contributes())
            .map(Semester::total_credits)
            .sum()
    }

    /// Semesters counting towards the CGPA, ordered by year then semester
    #[must_use]
    pub fn history(&self) -> Vec<HistoryEntry> {
        self.semesters
            .values()
            .filter_map(|s| {
                let total_credits = s.total_credits();
                s.sgpa()
                    .filter(|_| total_credits > 0.0)
                    .map(|sgpa| HistoryEntry {
                        key: s.key,
                        total_credits,
                        sgpa,
                        is_manual: s.is_manual(),
                    })
            })
            .collect()
    }

    /// Drop every semester and the selection
    pub fn reset(&mut self) {
        debug!("Resetting session ({} semester(s))", self.semesters.len());
        self.semesters.clear();
        self.selected = None;
    }
}
