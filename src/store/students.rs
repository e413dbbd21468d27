//! Codec for the students file: one student per line, comma-separated
//! fields, the transcript joined by `;` in the final field.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::models::{Student, StudentKind};
use crate::registry::Registry;

use super::paths::StorePaths;
use super::LoadOutcome;

pub(crate) const STUDENTS_HEADER: &str = "StudentID,Name,Type,EnrolledCourses";

/// Render the whole student collection, header first, insertion order
/// preserved. Deterministic so repeated saves of unchanged state are
/// byte-identical.
pub(crate) fn encode_students(registry: &Registry) -> String {
    let mut out = String::from(STUDENTS_HEADER);
    out.push('\n');
    for student in registry.students() {
        out.push_str(&format!(
            "{},{},{},{}\n",
            student.id,
            student.name,
            student.kind,
            student.courses.join(";")
        ));
    }
    out
}

/// Parse one data row. `None` marks a malformed row: wrong field count or an
/// unrecognized kind label. Callers skip such rows and keep loading.
pub(crate) fn decode_student_line(line: &str) -> Option<Student> {
    let fields: Vec<&str> = line.split(',').collect();
    let [id, name, kind_label, courses] = fields.as_slice() else {
        return None;
    };
    let kind = StudentKind::parse(kind_label).ok()?;

    let mut student = Student::new(id.to_string(), name.to_string(), kind);
    if !courses.is_empty() {
        student.courses = courses
            .split(';')
            .filter(|c| !c.is_empty())
            .map(str::to_string)
            .collect();
    }
    Some(student)
}

/// Overwrite the students file with the current collection, creating parent
/// directories on demand.
pub fn save_students(registry: &Registry, paths: &StorePaths) -> Result<PathBuf> {
    let path = paths.students_file();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("failed to create students directory")?;
    }
    fs::write(&path, encode_students(registry))
        .with_context(|| format!("failed to write students file {}", path.display()))?;
    Ok(path)
}

/// Read the students file into the registry. A missing file is the expected
/// first-run state and loads zero rows. Malformed and duplicate-id rows are
/// skipped, the rest of the file still loads.
pub fn load_students(registry: &mut Registry, paths: &StorePaths) -> Result<LoadOutcome> {
    let path = paths.students_file();
    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Ok(LoadOutcome::default())
        }
        Err(err) => {
            return Err(err)
                .with_context(|| format!("failed to read students file {}", path.display()))
        }
    };

    let mut outcome = LoadOutcome::default();
    // First line is the header.
    for line in content.lines().skip(1) {
        if line.is_empty() {
            continue;
        }
        match decode_student_line(line) {
            Some(student) => {
                if registry.restore_student(student) {
                    outcome.loaded += 1;
                } else {
                    outcome.skipped += 1;
                }
            }
            None => outcome.skipped += 1,
        }
    }
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_a_full_row() {
        let student = decode_student_line("S001,Alice Johnson,Undergraduate,CSE101;CSE102")
            .expect("row should decode");
        assert_eq!(student.id, "S001");
        assert_eq!(student.name, "Alice Johnson");
        assert_eq!(student.kind, StudentKind::Undergraduate);
        assert_eq!(student.courses, vec!["CSE101", "CSE102"]);
    }

    #[test]
    fn decodes_an_empty_transcript() {
        let student =
            decode_student_line("S002,Bob Smith,Postgraduate,").expect("row should decode");
        assert!(student.courses.is_empty());
    }

    #[test]
    fn rejects_wrong_field_count_and_unknown_kind() {
        assert!(decode_student_line("S001,Alice Johnson,Undergraduate").is_none());
        assert!(decode_student_line("S001,Alice,Johnson,Undergraduate,CSE101").is_none());
        assert!(decode_student_line("S001,Alice Johnson,Doctorate,CSE101").is_none());
    }

    #[test]
    fn encode_emits_header_and_rows_in_insertion_order() {
        let mut registry = Registry::new();
        registry
            .add_student("Alice Johnson", "S001", StudentKind::Undergraduate)
            .unwrap();
        registry
            .add_student("Bob Smith", "S002", StudentKind::Postgraduate)
            .unwrap();
        registry.add_course("Data Structures", "CSE102").unwrap();
        registry.enroll("S001", "CSE102").unwrap();

        assert_eq!(
            encode_students(&registry),
            "StudentID,Name,Type,EnrolledCourses\n\
             S001,Alice Johnson,Undergraduate,CSE102\n\
             S002,Bob Smith,Postgraduate,\n"
        );
    }
}
