//! Report projection: render one course's roster or one student's
//! transcript as a small CSV-shaped artifact, both for display in the UI
//! and for writing under the reports directory. Reports only read the
//! registry; a failed write never touches its state.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::error::RegistryError;
use crate::registry::Registry;
use crate::store::StorePaths;

/// Rendered report text plus the file it was written to.
#[derive(Debug)]
pub struct SavedReport {
    pub body: String,
    pub path: PathBuf,
}

/// Render the roster of one course: `StudentID,Name,Type` rows in stored
/// roster order. Roster ids with no matching student record are skipped.
pub fn build_course_report(registry: &Registry, code: &str) -> Result<String, RegistryError> {
    let course = registry
        .find_course(code)
        .ok_or_else(|| RegistryError::CourseNotFound(code.to_string()))?;

    let mut body = String::from("StudentID,Name,Type\n");
    for id in &course.students {
        if let Some(student) = registry.find_student(id) {
            body.push_str(&format!(
                "{},{},{}\n",
                student.id, student.name, student.kind
            ));
        }
    }
    Ok(body)
}

/// Render one student's transcript: the student's own row, a blank
/// separator line, then `CourseCode,CourseName` rows in stored order.
/// Transcript codes with no matching course record are skipped.
pub fn build_student_report(registry: &Registry, id: &str) -> Result<String, RegistryError> {
    let student = registry
        .find_student(id)
        .ok_or_else(|| RegistryError::StudentNotFound(id.to_string()))?;

    let mut body = String::from("StudentID,Name,Type\n");
    body.push_str(&format!(
        "{},{},{}\n\n",
        student.id, student.name, student.kind
    ));
    body.push_str("CourseCode,CourseName\n");
    for code in &student.courses {
        if let Some(course) = registry.find_course(code) {
            body.push_str(&format!("{},{}\n", course.code, course.name));
        }
    }
    Ok(body)
}

/// Build and write a course report. An unknown code surfaces before any
/// file is touched.
pub fn save_course_report(
    registry: &Registry,
    code: &str,
    paths: &StorePaths,
) -> Result<SavedReport> {
    let body = build_course_report(registry, code)?;
    let path = paths.course_report_file(code);
    write_report(&path, &body)?;
    Ok(SavedReport { body, path })
}

/// Build and write a student report.
pub fn save_student_report(
    registry: &Registry,
    id: &str,
    paths: &StorePaths,
) -> Result<SavedReport> {
    let body = build_student_report(registry, id)?;
    let path = paths.student_report_file(id);
    write_report(&path, &body)?;
    Ok(SavedReport { body, path })
}

fn write_report(path: &Path, body: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("failed to create reports directory")?;
    }
    fs::write(path, body)
        .with_context(|| format!("failed to write report file {}", path.display()))
}
