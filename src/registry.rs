//! The registry owns the student and course collections outright and is the
//! only place either one is mutated. Both uniqueness of keys and the
//! symmetry between transcripts and rosters are enforced here, so every
//! other layer (store, reports, UI) can treat the collections as consistent
//! read-only views.
//!
//! Collections are expected to stay small, so lookups are linear scans over
//! the insertion-ordered vectors rather than anything indexed.

use crate::error::RegistryError;
use crate::models::{Course, Student, StudentKind};

/// Owning container for all students and courses.
#[derive(Debug, Default)]
pub struct Registry {
    students: Vec<Student>,
    courses: Vec<Course>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Linear scan for a student by id. Absence is a routine condition used
    /// for existence checks, hence `Option` rather than an error.
    pub fn find_student(&self, id: &str) -> Option<&Student> {
        self.students.iter().find(|s| s.id == id)
    }

    /// Linear scan for a course by code.
    pub fn find_course(&self, code: &str) -> Option<&Course> {
        self.courses.iter().find(|c| c.code == code)
    }

    fn student_index(&self, id: &str) -> Option<usize> {
        self.students.iter().position(|s| s.id == id)
    }

    fn course_index(&self, code: &str) -> Option<usize> {
        self.courses.iter().position(|c| c.code == code)
    }

    /// Insert a new student, rejecting duplicate ids. The kind arrives
    /// already typed; label parsing happens at the boundary.
    pub fn add_student(
        &mut self,
        name: &str,
        id: &str,
        kind: StudentKind,
    ) -> Result<(), RegistryError> {
        if self.find_student(id).is_some() {
            return Err(RegistryError::DuplicateStudent(id.to_string()));
        }
        self.students
            .push(Student::new(id.to_string(), name.to_string(), kind));
        Ok(())
    }

    /// Remove a student and cascade the id out of every course roster so no
    /// dangling reference survives.
    pub fn remove_student(&mut self, id: &str) -> Result<(), RegistryError> {
        let idx = self
            .student_index(id)
            .ok_or_else(|| RegistryError::StudentNotFound(id.to_string()))?;
        for course in &mut self.courses {
            course.students.retain(|s| s != id);
        }
        self.students.remove(idx);
        Ok(())
    }

    /// Insert a new course, rejecting duplicate codes.
    pub fn add_course(&mut self, name: &str, code: &str) -> Result<(), RegistryError> {
        if self.find_course(code).is_some() {
            return Err(RegistryError::DuplicateCourse(code.to_string()));
        }
        self.courses
            .push(Course::new(code.to_string(), name.to_string()));
        Ok(())
    }

    /// Remove a course and cascade the code out of every transcript.
    pub fn remove_course(&mut self, code: &str) -> Result<(), RegistryError> {
        let idx = self
            .course_index(code)
            .ok_or_else(|| RegistryError::CourseNotFound(code.to_string()))?;
        for student in &mut self.students {
            student.courses.retain(|c| c != code);
        }
        self.courses.remove(idx);
        Ok(())
    }

    /// Link a student and a course on both sides. Both keys must exist, and
    /// an existing link is reported as `AlreadyEnrolled` rather than being
    /// silently duplicated.
    pub fn enroll(&mut self, student_id: &str, course_code: &str) -> Result<(), RegistryError> {
        let s_idx = self
            .student_index(student_id)
            .ok_or_else(|| RegistryError::StudentNotFound(student_id.to_string()))?;
        let c_idx = self
            .course_index(course_code)
            .ok_or_else(|| RegistryError::CourseNotFound(course_code.to_string()))?;

        if self.students[s_idx].courses.iter().any(|c| c == course_code) {
            return Err(RegistryError::AlreadyEnrolled {
                student: student_id.to_string(),
                course: course_code.to_string(),
            });
        }

        self.students[s_idx].courses.push(course_code.to_string());
        self.courses[c_idx].students.push(student_id.to_string());
        Ok(())
    }

    /// Remove the link between a student and a course on both sides. Both
    /// keys must exist; an absent link is a no-op.
    pub fn unenroll(&mut self, student_id: &str, course_code: &str) -> Result<(), RegistryError> {
        let s_idx = self
            .student_index(student_id)
            .ok_or_else(|| RegistryError::StudentNotFound(student_id.to_string()))?;
        let c_idx = self
            .course_index(course_code)
            .ok_or_else(|| RegistryError::CourseNotFound(course_code.to_string()))?;

        self.students[s_idx].courses.retain(|c| c != course_code);
        self.courses[c_idx].students.retain(|s| s != student_id);
        Ok(())
    }

    /// All students in insertion order. Restartable: call again for a fresh
    /// pass.
    pub fn students(&self) -> impl Iterator<Item = &Student> {
        self.students.iter()
    }

    /// All courses in insertion order.
    pub fn courses(&self) -> impl Iterator<Item = &Course> {
        self.courses.iter()
    }

    pub fn student_count(&self) -> usize {
        self.students.len()
    }

    pub fn course_count(&self) -> usize {
        self.courses.len()
    }

    /// Students whose name, id, or any enrolled course code contains
    /// `keyword` as a case-sensitive substring. An empty result means no
    /// match, not an error.
    pub fn search_students<'a>(&'a self, keyword: &'a str) -> impl Iterator<Item = &'a Student> {
        self.students.iter().filter(move |s| {
            s.name.contains(keyword)
                || s.id.contains(keyword)
                || s.courses.iter().any(|c| c.contains(keyword))
        })
    }

    /// Rebuild one student from a persisted row. Duplicate ids are skipped
    /// (the row is dropped, mirroring the live duplicate check) and the
    /// transcript is deduplicated. Course existence is deliberately not
    /// checked: the two files load independently and the courses file may
    /// not have been read yet.
    pub(crate) fn restore_student(&mut self, mut student: Student) -> bool {
        if self.find_student(&student.id).is_some() {
            return false;
        }
        let mut seen = Vec::with_capacity(student.courses.len());
        student.courses.retain(|c| {
            if seen.iter().any(|s: &String| s == c) {
                false
            } else {
                seen.push(c.clone());
                true
            }
        });
        self.students.push(student);
        true
    }

    /// Rebuild one course from a persisted row; same skip/dedup rules as
    /// `restore_student`.
    pub(crate) fn restore_course(&mut self, mut course: Course) -> bool {
        if self.find_course(&course.code).is_some() {
            return false;
        }
        let mut seen = Vec::with_capacity(course.students.len());
        course.students.retain(|s| {
            if seen.iter().any(|x: &String| x == s) {
                false
            } else {
                seen.push(s.clone());
                true
            }
        });
        self.courses.push(course);
        true
    }

    /// Deterministic fixture set: five students, four courses, eight
    /// enrollments. Duplicate-safe, so running it against a registry that
    /// already holds the fixtures changes nothing.
    pub fn populate_sample_data(&mut self) {
        let students = [
            ("Alice Johnson", "S001", StudentKind::Undergraduate),
            ("Bob Smith", "S002", StudentKind::Postgraduate),
            ("Charlie Brown", "S003", StudentKind::Undergraduate),
            ("David Williams", "S004", StudentKind::Undergraduate),
            ("Eve Davis", "S005", StudentKind::Postgraduate),
        ];
        for (name, id, kind) in students {
            let _ = self.add_student(name, id, kind);
        }

        let courses = [
            ("Introduction to Programming", "CSE101"),
            ("Data Structures", "CSE102"),
            ("Algorithms", "CSE103"),
            ("Operating Systems", "CSE104"),
        ];
        for (name, code) in courses {
            let _ = self.add_course(name, code);
        }

        let enrollments = [
            ("S001", "CSE101"),
            ("S001", "CSE102"),
            ("S002", "CSE101"),
            ("S003", "CSE103"),
            ("S004", "CSE104"),
            ("S005", "CSE101"),
            ("S005", "CSE102"),
            ("S005", "CSE104"),
        ];
        for (id, code) in enrollments {
            let _ = self.enroll(id, code);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_registry() -> Registry {
        let mut registry = Registry::new();
        registry
            .add_student("Alice Johnson", "S001", StudentKind::Undergraduate)
            .unwrap();
        registry
            .add_student("Bob Smith", "S002", StudentKind::Postgraduate)
            .unwrap();
        registry.add_course("Data Structures", "CSE102").unwrap();
        registry.add_course("Algorithms", "CSE103").unwrap();
        registry
    }

    /// Transcript and roster must mention each other symmetrically for every
    /// possible pair.
    fn assert_symmetry(registry: &Registry) {
        for student in registry.students() {
            for course in registry.courses() {
                let in_transcript = student.courses.iter().any(|c| *c == course.code);
                let in_roster = course.students.iter().any(|s| *s == student.id);
                assert_eq!(
                    in_transcript, in_roster,
                    "asymmetric link between {} and {}",
                    student.id, course.code
                );
            }
        }
    }

    #[test]
    fn duplicate_student_id_is_rejected() {
        let mut registry = sample_registry();
        let err = registry
            .add_student("Someone Else", "S001", StudentKind::Postgraduate)
            .unwrap_err();
        assert_eq!(err, RegistryError::DuplicateStudent("S001".to_string()));
        assert_eq!(registry.student_count(), 2);
        assert_eq!(registry.find_student("S001").unwrap().name, "Alice Johnson");
    }

    #[test]
    fn duplicate_course_code_is_rejected() {
        let mut registry = sample_registry();
        let err = registry.add_course("Other Name", "CSE102").unwrap_err();
        assert_eq!(err, RegistryError::DuplicateCourse("CSE102".to_string()));
        assert_eq!(registry.course_count(), 2);
    }

    #[test]
    fn enroll_links_both_sides() {
        let mut registry = sample_registry();
        registry.enroll("S001", "CSE102").unwrap();

        let student = registry.find_student("S001").unwrap();
        let course = registry.find_course("CSE102").unwrap();
        assert_eq!(student.courses, vec!["CSE102".to_string()]);
        assert_eq!(course.students, vec!["S001".to_string()]);
        assert_symmetry(&registry);
    }

    #[test]
    fn enroll_unknown_keys_report_not_found() {
        let mut registry = sample_registry();
        assert_eq!(
            registry.enroll("S999", "CSE102").unwrap_err(),
            RegistryError::StudentNotFound("S999".to_string())
        );
        assert_eq!(
            registry.enroll("S001", "CSE999").unwrap_err(),
            RegistryError::CourseNotFound("CSE999".to_string())
        );
        assert!(registry.find_course("CSE102").unwrap().students.is_empty());
    }

    #[test]
    fn double_enroll_reports_already_enrolled_and_keeps_one_entry() {
        let mut registry = sample_registry();
        registry.enroll("S001", "CSE102").unwrap();
        let err = registry.enroll("S001", "CSE102").unwrap_err();
        assert_eq!(
            err,
            RegistryError::AlreadyEnrolled {
                student: "S001".to_string(),
                course: "CSE102".to_string(),
            }
        );
        assert_eq!(registry.find_course("CSE102").unwrap().students.len(), 1);
        assert_symmetry(&registry);
    }

    #[test]
    fn unenroll_removes_both_sides_and_tolerates_missing_link() {
        let mut registry = sample_registry();
        registry.enroll("S001", "CSE102").unwrap();
        registry.unenroll("S001", "CSE102").unwrap();
        assert!(registry.find_student("S001").unwrap().courses.is_empty());
        assert!(registry.find_course("CSE102").unwrap().students.is_empty());

        // Not currently linked: still Ok, still symmetric.
        registry.unenroll("S001", "CSE103").unwrap();
        assert_symmetry(&registry);

        assert_eq!(
            registry.unenroll("S009", "CSE102").unwrap_err(),
            RegistryError::StudentNotFound("S009".to_string())
        );
    }

    #[test]
    fn removing_a_student_cascades_out_of_every_roster() {
        let mut registry = sample_registry();
        registry.enroll("S001", "CSE102").unwrap();
        registry.enroll("S001", "CSE103").unwrap();
        registry.enroll("S002", "CSE102").unwrap();

        registry.remove_student("S001").unwrap();

        assert!(registry.find_student("S001").is_none());
        assert_eq!(
            registry.find_course("CSE102").unwrap().students,
            vec!["S002".to_string()]
        );
        assert!(registry.find_course("CSE103").unwrap().students.is_empty());
        assert_symmetry(&registry);
    }

    #[test]
    fn removing_a_course_cascades_out_of_every_transcript() {
        let mut registry = sample_registry();
        registry.enroll("S001", "CSE102").unwrap();
        registry.enroll("S002", "CSE102").unwrap();
        registry.enroll("S002", "CSE103").unwrap();

        registry.remove_course("CSE102").unwrap();

        assert!(registry.find_course("CSE102").is_none());
        assert!(registry.find_student("S001").unwrap().courses.is_empty());
        assert_eq!(
            registry.find_student("S002").unwrap().courses,
            vec!["CSE103".to_string()]
        );
        assert_symmetry(&registry);
    }

    #[test]
    fn re_enrolling_after_course_recreation_works() {
        let mut registry = sample_registry();
        registry.enroll("S001", "CSE102").unwrap();
        registry.remove_course("CSE102").unwrap();
        registry.add_course("Data Structures", "CSE102").unwrap();
        registry.enroll("S001", "CSE102").unwrap();

        assert_eq!(
            registry.find_student("S001").unwrap().courses,
            vec!["CSE102".to_string()]
        );
        assert_symmetry(&registry);
    }

    #[test]
    fn search_matches_name_id_and_course_code_case_sensitively() {
        let mut registry = sample_registry();
        registry.enroll("S002", "CSE103").unwrap();

        let by_name: Vec<_> = registry.search_students("Alice").map(|s| &s.id).collect();
        assert_eq!(by_name, vec!["S001"]);

        let by_id: Vec<_> = registry.search_students("S00").map(|s| &s.id).collect();
        assert_eq!(by_id, vec!["S001", "S002"]);

        let by_course: Vec<_> = registry.search_students("CSE103").map(|s| &s.id).collect();
        assert_eq!(by_course, vec!["S002"]);

        assert_eq!(registry.search_students("alice").count(), 0);
        assert_eq!(registry.search_students("nope").count(), 0);
    }

    #[test]
    fn sample_data_is_idempotent() {
        let mut registry = Registry::new();
        registry.populate_sample_data();
        assert_eq!(registry.student_count(), 5);
        assert_eq!(registry.course_count(), 4);
        assert_eq!(
            registry.find_student("S005").unwrap().courses,
            vec!["CSE101", "CSE102", "CSE104"]
        );
        assert_symmetry(&registry);

        registry.populate_sample_data();
        assert_eq!(registry.student_count(), 5);
        assert_eq!(registry.find_course("CSE101").unwrap().students.len(), 3);
        assert_symmetry(&registry);
    }

    #[test]
    fn restore_skips_duplicates_and_dedups_references() {
        let mut registry = Registry::new();
        let mut first = Student::new(
            "S001".to_string(),
            "Alice Johnson".to_string(),
            StudentKind::Undergraduate,
        );
        first.courses = vec![
            "CSE101".to_string(),
            "CSE102".to_string(),
            "CSE101".to_string(),
        ];
        assert!(registry.restore_student(first));
        assert_eq!(
            registry.find_student("S001").unwrap().courses,
            vec!["CSE101", "CSE102"]
        );

        let second = Student::new(
            "S001".to_string(),
            "Impostor".to_string(),
            StudentKind::Postgraduate,
        );
        assert!(!registry.restore_student(second));
        assert_eq!(registry.find_student("S001").unwrap().name, "Alice Johnson");
    }
}
