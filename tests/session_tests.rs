//! Integration tests for the session state machine and its persistence

use gpa_guru::core::store::{SELECTED_SEMESTER_KEY, SEMESTERS_KEY};
use gpa_guru::{
    CourseTemplates, FileStore, GpaError, KeyValueStore, MemoryStore, NewCourse, SelectOutcome,
    SemesterKey, Session, StoreError,
};
use tempfile::TempDir;

fn key(s: &str) -> SemesterKey {
    s.parse().expect("valid semester key")
}

/// Session with `Y1S1` selected and two graded courses, no templates
fn graded_session() -> Session {
    let mut session = Session::new(CourseTemplates::empty());
    session.select(key("Y1S1"));
    session
        .add_course(key("Y1S1"), NewCourse::new("Data Structures", 3.0, 9.0))
        .unwrap();
    session
        .add_course(key("Y1S1"), NewCourse::new("Signals", 1.5, 8.0))
        .unwrap();
    session
}

#[test]
fn test_first_selection_uses_template() {
    let mut session = Session::new(CourseTemplates::builtin());
    let outcome = session.select(key("Y1S1"));

    assert_eq!(outcome, SelectOutcome::Populated(9));
    let semester = session.selected_semester().unwrap();
    assert!((semester.total_credits() - 19.5).abs() < 1e-9);
    assert!(semester.courses().iter().all(|c| c.grade_point == 0.0));
    // All courses ungraded: SGPA is defined and zero
    assert_eq!(session.current_sgpa(), Some(0.0));
}

#[test]
fn test_sgpa_follows_course_edits() {
    let mut session = graded_session();
    assert_eq!(session.current_sgpa(), Some(8.67));

    let id = session.selected_semester().unwrap().courses()[1].id.clone();
    session.update_grade(key("Y1S1"), &id, 10.0).unwrap();
    assert_eq!(session.current_sgpa(), Some(9.33));

    session.remove_course(key("Y1S1"), &id).unwrap();
    assert_eq!(session.current_sgpa(), Some(9.0));
}

#[test]
fn test_invalid_grade_leaves_course_unchanged() {
    let mut session = graded_session();
    let id = session.selected_semester().unwrap().courses()[0].id.clone();

    let err = session.update_grade(key("Y1S1"), &id, 10.5).unwrap_err();
    assert!(matches!(err, GpaError::Validation(_)));
    assert_eq!(
        session.selected_semester().unwrap().course(&id).unwrap().grade_point,
        9.0
    );
}

#[test]
fn test_cgpa_across_semesters() {
    let mut session = graded_session();
    session.enter_manual(key("Y1S2"), 7.0, 20.0).unwrap();

    assert_eq!(session.cgpa(), Some(7.31));

    let history = session.history();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].key, key("Y1S1"));
    assert_eq!(history[0].entry_type(), "Calculated");
    assert_eq!(history[1].key, key("Y1S2"));
    assert_eq!(history[1].entry_type(), "Manual");
}

#[test]
fn test_cgpa_ignores_semesters_without_credits() {
    let mut session = Session::new(CourseTemplates::empty());
    session.select(key("Y1S1"));
    session.select(key("Y2S1"));

    assert_eq!(session.cgpa(), None);
    assert!(session.history().is_empty());
}

#[test]
fn test_manual_entry_conflicts_with_courses() {
    let mut session = graded_session();
    let before = session.semester(key("Y1S1")).cloned();

    let err = session.enter_manual(key("Y1S1"), 9.0, 20.0).unwrap_err();
    assert!(matches!(err, GpaError::ManualEntryConflict(_)));
    assert_eq!(session.semester(key("Y1S1")).cloned(), before);
}

#[test]
fn test_manual_entry_conflicts_with_manual() {
    let mut session = Session::new(CourseTemplates::empty());
    session.enter_manual(key("Y2S2"), 8.0, 22.0).unwrap();

    let err = session.enter_manual(key("Y2S2"), 6.0, 18.0).unwrap_err();
    assert!(matches!(err, GpaError::ManualEntryConflict(_)));
    assert_eq!(session.sgpa(key("Y2S2")), Some(8.0));
}

#[test]
fn test_manual_entry_allowed_on_empty_computed_semester() {
    let mut session = Session::new(CourseTemplates::empty());
    session.select(key("Y3S1"));
    session.enter_manual(key("Y3S1"), 8.25, 24.0).unwrap();

    let semester = session.semester(key("Y3S1")).unwrap();
    assert!(semester.is_manual());
    assert_eq!(session.current_sgpa(), Some(8.25));
}

#[test]
fn test_override_replaces_courses() {
    let mut session = graded_session();
    session.override_manual(key("Y1S1"), 6.5, 21.0).unwrap();

    let semester = session.semester(key("Y1S1")).unwrap();
    assert!(semester.is_manual());
    assert!(semester.courses().is_empty());
    assert_eq!(semester.total_credits(), 21.0);
}

#[test]
fn test_manual_values_are_validated() {
    let mut session = Session::new(CourseTemplates::empty());
    assert!(session.enter_manual(key("Y1S1"), 10.5, 20.0).is_err());
    assert!(session.enter_manual(key("Y1S1"), 8.0, 0.0).is_err());
    assert!(session.override_manual(key("Y1S1"), 8.0, 150.0).is_err());
    assert!(session.semester(key("Y1S1")).is_none());
}

#[test]
fn test_course_edits_rejected_on_manual_semester() {
    let mut session = Session::new(CourseTemplates::empty());
    session.enter_manual(key("Y1S1"), 8.0, 20.0).unwrap();
    session.select(key("Y1S1"));

    let err = session
        .add_course(key("Y1S1"), NewCourse::new("Thesis", 4.0, 9.0))
        .unwrap_err();
    assert!(matches!(err, GpaError::ManualSemester(_)));
    assert!(matches!(
        session.remove_course(key("Y1S1"), "any"),
        Err(GpaError::ManualSemester(_))
    ));
    assert!(matches!(
        session.update_grade(key("Y1S1"), "any", 9.0),
        Err(GpaError::ManualSemester(_))
    ));
    assert!(session.semester(key("Y1S1")).unwrap().is_manual());
}

#[test]
fn test_require_selected() {
    let session = Session::new(CourseTemplates::empty());
    assert!(matches!(
        session.require_selected(),
        Err(GpaError::NoSemesterSelected)
    ));
}

#[test]
fn test_course_ids_stay_unique_after_removal() {
    let mut session = Session::new(CourseTemplates::empty());
    session.select(key("Y1S1"));
    let first = session
        .add_course(key("Y1S1"), NewCourse::new("Physics", 3.0, 8.0))
        .unwrap()
        .id
        .clone();
    session
        .add_course(key("Y1S1"), NewCourse::new("Physics", 3.0, 8.0))
        .unwrap();
    session.remove_course(key("Y1S1"), &first).unwrap();
    let third = session
        .add_course(key("Y1S1"), NewCourse::new("Physics", 3.0, 8.0))
        .unwrap()
        .id
        .clone();

    let ids: Vec<&str> = session
        .selected_semester()
        .unwrap()
        .courses()
        .iter()
        .map(|c| c.id.as_str())
        .collect();
    assert_eq!(ids.len(), 2);
    assert_ne!(ids[0], ids[1]);
    assert!(ids.contains(&third.as_str()));
}

#[test]
fn test_memory_store_round_trip() {
    let mut session = graded_session();
    session.enter_manual(key("Y1S2"), 7.0, 20.0).unwrap();

    let mut store = MemoryStore::new();
    session.save(&mut store).unwrap();

    let restored = Session::load(&store, CourseTemplates::empty()).unwrap();
    assert_eq!(restored.selected(), Some(key("Y1S1")));
    assert_eq!(restored.len(), 2);
    assert_eq!(restored.cgpa(), session.cgpa());
    assert_eq!(
        restored.semester(key("Y1S1")),
        session.semester(key("Y1S1"))
    );
    assert!(restored.semester(key("Y1S2")).unwrap().is_manual());
}

#[test]
fn test_stored_shape_uses_camel_case_keys() {
    let session = graded_session();
    let mut store = MemoryStore::new();
    session.save(&mut store).unwrap();

    let raw = store.get(SEMESTERS_KEY).unwrap().unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let y1s1 = &value["Y1S1"];
    assert_eq!(y1s1["id"], "Y1S1");
    assert_eq!(y1s1["year"], 1);
    assert_eq!(y1s1["semesterInYear"], 1);
    assert_eq!(y1s1["isManual"], false);
    assert_eq!(y1s1["totalCredits"], 4.5);
    assert_eq!(y1s1["sgpa"], 8.67);
    assert_eq!(y1s1["courses"][0]["gradePoint"], 9.0);

    let selected = store.get(SELECTED_SEMESTER_KEY).unwrap().unwrap();
    assert_eq!(selected, "\"Y1S1\"");
}

#[test]
fn test_reset_removes_stored_selection() {
    let mut session = graded_session();
    let mut store = MemoryStore::new();
    session.save(&mut store).unwrap();

    session.reset();
    session.save(&mut store).unwrap();

    assert_eq!(store.get(SELECTED_SEMESTER_KEY).unwrap(), None);
    let restored = Session::load(&store, CourseTemplates::empty()).unwrap();
    assert!(restored.is_empty());
    assert_eq!(restored.selected(), None);
}

#[test]
fn test_load_from_empty_store() {
    let store = MemoryStore::new();
    let session = Session::load(&store, CourseTemplates::builtin()).unwrap();
    assert!(session.is_empty());
    assert_eq!(session.selected(), None);
    assert_eq!(session.cgpa(), None);
}

#[test]
fn test_load_recomputes_derived_values() {
    let mut store = MemoryStore::new();
    store
        .set(
            SEMESTERS_KEY,
            r#"{
  "Y1S1": {
    "id": "Y1S1",
    "year": 1,
    "semesterInYear": 1,
    "courses": [
      { "id": "Y1S1-a-0", "name": "Algebra", "credits": 3, "gradePoint": 9 },
      { "id": "Y1S1-b-1", "name": "Biology", "credits": 1.5, "gradePoint": 8 }
    ],
    "sgpa": 1.23,
    "totalCredits": 99,
    "isManual": false
  }
}"#,
        )
        .unwrap();

    let session = Session::load(&store, CourseTemplates::empty()).unwrap();
    let semester = session.semester(key("Y1S1")).unwrap();
    assert_eq!(semester.sgpa(), Some(8.67));
    assert!((semester.total_credits() - 4.5).abs() < 1e-9);
}

#[test]
fn test_load_skips_invalid_records() {
    let mut store = MemoryStore::new();
    store
        .set(
            SEMESTERS_KEY,
            r#"{
  "Y1S1": { "id": "Y1S1", "year": 1, "semesterInYear": 1, "sgpa": null, "totalCredits": 20, "isManual": true },
  "Y1S2": { "id": "Y1S2", "year": 1, "semesterInYear": 2, "sgpa": 7.5, "totalCredits": 20, "isManual": true }
}"#,
        )
        .unwrap();
    store.set(SELECTED_SEMESTER_KEY, "\"bogus\"").unwrap();

    let session = Session::load(&store, CourseTemplates::empty()).unwrap();
    assert_eq!(session.len(), 1);
    assert_eq!(session.sgpa(key("Y1S2")), Some(7.5));
    assert_eq!(session.selected(), None);
}

#[test]
fn test_load_skips_out_of_range_records() {
    let mut store = MemoryStore::new();
    store
        .set(
            SEMESTERS_KEY,
            r#"{
  "Y1S1": { "id": "Y1S1", "year": 1, "semesterInYear": 1, "sgpa": 42, "totalCredits": 20, "isManual": true },
  "Y1S2": { "id": "Y1S2", "year": 1, "semesterInYear": 2,
            "courses": [ { "id": "Y1S2-x-0", "name": "Optics", "credits": -3, "gradePoint": 50 } ],
            "sgpa": 50, "totalCredits": -3, "isManual": false },
  "Y2S1": { "id": "Y2S1", "year": 2, "semesterInYear": 1, "sgpa": 8.5, "totalCredits": 20, "isManual": true }
}"#,
        )
        .unwrap();

    let session = Session::load(&store, CourseTemplates::empty()).unwrap();
    assert_eq!(session.len(), 1);
    assert!(session.semester(key("Y1S1")).is_none());
    assert!(session.semester(key("Y1S2")).is_none());
    assert_eq!(session.cgpa(), Some(8.5));
}

#[test]
fn test_add_course_after_stored_max_suffix() {
    let mut store = MemoryStore::new();
    store
        .set(
            SEMESTERS_KEY,
            r#"{
  "Y1S1": { "id": "Y1S1", "year": 1, "semesterInYear": 1,
            "courses": [ { "id": "Y1S1-x-18446744073709551615", "name": "Xray", "credits": 3, "gradePoint": 9 } ],
            "sgpa": 9, "totalCredits": 3, "isManual": false }
}"#,
        )
        .unwrap();

    let mut session = Session::load(&store, CourseTemplates::empty()).unwrap();
    let id = session
        .add_course(key("Y1S1"), NewCourse::new("Maths", 3.0, 8.0))
        .unwrap()
        .id
        .clone();

    assert_eq!(id, "Y1S1-maths-0");
    assert_eq!(session.semester(key("Y1S1")).unwrap().courses().len(), 2);
}

#[test]
fn test_corrupt_store_is_an_error() {
    let mut store = MemoryStore::new();
    store.set(SEMESTERS_KEY, "{ not json").unwrap();

    let err = Session::load(&store, CourseTemplates::empty()).unwrap_err();
    assert!(matches!(err, GpaError::Storage(StoreError::Json(_))));
}

#[test]
fn test_file_store_round_trip() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let mut store = FileStore::new(temp_dir.path().join("data"));

    let mut session = Session::new(CourseTemplates::builtin());
    session.select(key("Y2S1"));
    let id = session.selected_semester().unwrap().courses()[0].id.clone();
    session.update_grade(key("Y2S1"), &id, 10.0).unwrap();
    session.save(&mut store).unwrap();

    assert!(store.entry_path(SEMESTERS_KEY).exists());
    assert!(store.entry_path(SELECTED_SEMESTER_KEY).exists());

    let reopened = FileStore::new(temp_dir.path().join("data"));
    let restored = Session::load(&reopened, CourseTemplates::builtin()).unwrap();
    assert_eq!(restored.selected(), Some(key("Y2S1")));
    assert_eq!(restored.current_sgpa(), session.current_sgpa());
    assert_eq!(
        restored.selected_semester().unwrap().course(&id).unwrap().grade_point,
        10.0
    );
}
