use std::fs;

use student_roster_manager::reports::save_course_report;
use student_roster_manager::store::{
    load_registry, save_registry, LoadSummary, StorePaths,
};
use student_roster_manager::{Registry, StudentKind};

fn temp_paths() -> (tempfile::TempDir, StorePaths) {
    let dir = tempfile::tempdir().unwrap();
    let paths = StorePaths::at_root(dir.path());
    (dir, paths)
}

fn enrollment_pairs(registry: &Registry) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    for student in registry.students() {
        for code in &student.courses {
            pairs.push((student.id.clone(), code.clone()));
        }
    }
    pairs
}

#[test]
fn missing_files_load_an_empty_registry() {
    let (_dir, paths) = temp_paths();
    let (registry, summary) = load_registry(&paths).unwrap();
    assert_eq!(registry.student_count(), 0);
    assert_eq!(registry.course_count(), 0);
    assert_eq!(summary, LoadSummary::default());
}

#[test]
fn save_then_load_reconstructs_the_same_state() {
    let (_dir, paths) = temp_paths();

    let mut original = Registry::new();
    original.populate_sample_data();
    original
        .add_student("Frank Miller", "S006", StudentKind::Postgraduate)
        .unwrap();
    original.enroll("S006", "CSE103").unwrap();

    save_registry(&original, &paths).unwrap();
    let (loaded, summary) = load_registry(&paths).unwrap();

    assert_eq!(summary.students.loaded, 6);
    assert_eq!(summary.courses.loaded, 4);
    assert_eq!(summary.skipped_rows(), 0);

    let original_ids: Vec<_> = original.students().map(|s| s.id.clone()).collect();
    let loaded_ids: Vec<_> = loaded.students().map(|s| s.id.clone()).collect();
    assert_eq!(original_ids, loaded_ids);

    let original_codes: Vec<_> = original.courses().map(|c| c.code.clone()).collect();
    let loaded_codes: Vec<_> = loaded.courses().map(|c| c.code.clone()).collect();
    assert_eq!(original_codes, loaded_codes);

    assert_eq!(enrollment_pairs(&original), enrollment_pairs(&loaded));

    for student in original.students() {
        let twin = loaded.find_student(&student.id).unwrap();
        assert_eq!(twin.name, student.name);
        assert_eq!(twin.kind, student.kind);
    }
}

#[test]
fn saving_a_reloaded_registry_is_byte_identical() {
    let (_dir, paths) = temp_paths();

    let mut registry = Registry::new();
    registry.populate_sample_data();
    save_registry(&registry, &paths).unwrap();

    let first_students = fs::read_to_string(paths.students_file()).unwrap();
    let first_courses = fs::read_to_string(paths.courses_file()).unwrap();

    let (reloaded, _) = load_registry(&paths).unwrap();
    save_registry(&reloaded, &paths).unwrap();

    assert_eq!(
        fs::read_to_string(paths.students_file()).unwrap(),
        first_students
    );
    assert_eq!(
        fs::read_to_string(paths.courses_file()).unwrap(),
        first_courses
    );
}

#[test]
fn malformed_and_duplicate_rows_are_skipped_not_fatal() {
    let (_dir, paths) = temp_paths();

    let students_file = paths.students_file();
    fs::create_dir_all(students_file.parent().unwrap()).unwrap();
    fs::write(
        &students_file,
        "StudentID,Name,Type,EnrolledCourses\n\
         S001,Alice Johnson,Undergraduate,CSE101;CSE102\n\
         S002,Bob Smith\n\
         S003,Charlie Brown,Doctorate,\n\
         S001,Impostor,Postgraduate,\n\
         S004,David Williams,Undergraduate,\n",
    )
    .unwrap();

    let (registry, summary) = load_registry(&paths).unwrap();

    assert_eq!(summary.students.loaded, 2);
    assert_eq!(summary.students.skipped, 3);
    assert_eq!(summary.courses.loaded, 0);

    let ids: Vec<_> = registry.students().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec!["S001", "S004"]);
    assert_eq!(registry.find_student("S001").unwrap().name, "Alice Johnson");
    assert_eq!(
        registry.find_student("S001").unwrap().courses,
        vec!["CSE101", "CSE102"]
    );
}

#[test]
fn course_report_scenario_writes_the_expected_file() {
    let (_dir, paths) = temp_paths();

    let mut registry = Registry::new();
    registry
        .add_student("Alice Johnson", "S001", StudentKind::Undergraduate)
        .unwrap();
    registry.add_course("Data Structures", "CSE102").unwrap();
    registry.enroll("S001", "CSE102").unwrap();

    let saved = save_course_report(&registry, "CSE102", &paths).unwrap();
    assert_eq!(saved.path, paths.course_report_file("CSE102"));
    assert_eq!(
        fs::read_to_string(&saved.path).unwrap(),
        "StudentID,Name,Type\nS001,Alice Johnson,Undergraduate\n"
    );

    // Unknown course: reported, no file produced.
    let err = save_course_report(&registry, "CSE999", &paths).unwrap_err();
    assert!(err.to_string().contains("CSE999"));
    assert!(!paths.course_report_file("CSE999").exists());
}
