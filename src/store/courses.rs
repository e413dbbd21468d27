//! Codec for the courses file. Same shape as the students codec with one
//! fewer field and the roster in the trailing slot.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::models::Course;
use crate::registry::Registry;

use super::paths::StorePaths;
use super::LoadOutcome;

pub(crate) const COURSES_HEADER: &str = "CourseCode,CourseName,EnrolledStudents";

pub(crate) fn encode_courses(registry: &Registry) -> String {
    let mut out = String::from(COURSES_HEADER);
    out.push('\n');
    for course in registry.courses() {
        out.push_str(&format!(
            "{},{},{}\n",
            course.code,
            course.name,
            course.students.join(";")
        ));
    }
    out
}

/// Parse one data row; `None` marks a malformed row to be skipped.
pub(crate) fn decode_course_line(line: &str) -> Option<Course> {
    let fields: Vec<&str> = line.split(',').collect();
    let [code, name, students] = fields.as_slice() else {
        return None;
    };

    let mut course = Course::new(code.to_string(), name.to_string());
    if !students.is_empty() {
        course.students = students
            .split(';')
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
    }
    Some(course)
}

/// Overwrite the courses file with the current collection.
pub fn save_courses(registry: &Registry, paths: &StorePaths) -> Result<PathBuf> {
    let path = paths.courses_file();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("failed to create courses directory")?;
    }
    fs::write(&path, encode_courses(registry))
        .with_context(|| format!("failed to write courses file {}", path.display()))?;
    Ok(path)
}

/// Read the courses file into the registry. Missing file loads zero rows;
/// malformed and duplicate-code rows are skipped.
pub fn load_courses(registry: &mut Registry, paths: &StorePaths) -> Result<LoadOutcome> {
    let path = paths.courses_file();
    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Ok(LoadOutcome::default())
        }
        Err(err) => {
            return Err(err)
                .with_context(|| format!("failed to read courses file {}", path.display()))
        }
    };

    let mut outcome = LoadOutcome::default();
    for line in content.lines().skip(1) {
        if line.is_empty() {
            continue;
        }
        match decode_course_line(line) {
            Some(course) => {
                if registry.restore_course(course) {
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
    fn decodes_roster_and_empty_roster() {
        let course =
            decode_course_line("CSE101,Introduction to Programming,S001;S002;S005").unwrap();
        assert_eq!(course.code, "CSE101");
        assert_eq!(course.name, "Introduction to Programming");
        assert_eq!(course.students, vec!["S001", "S002", "S005"]);

        let empty = decode_course_line("CSE103,Algorithms,").unwrap();
        assert!(empty.students.is_empty());
    }

    #[test]
    fn rejects_wrong_field_count() {
        assert!(decode_course_line("CSE101,Introduction to Programming").is_none());
        assert!(decode_course_line("CSE101,Intro,to,Programming").is_none());
    }

    #[test]
    fn encode_emits_header_and_rows() {
        let mut registry = Registry::new();
        registry.add_course("Data Structures", "CSE102").unwrap();
        registry.add_course("Algorithms", "CSE103").unwrap();

        assert_eq!(
            encode_courses(&registry),
            "CourseCode,CourseName,EnrolledStudents\n\
             CSE102,Data Structures,\n\
             CSE103,Algorithms,\n"
        );
    }
}
