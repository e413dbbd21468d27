//! Error taxonomy for the registry core. Every variant is recoverable by
//! design: callers report the message and carry on, nothing here aborts the
//! process. I/O and environment failures are handled with `anyhow` at the
//! store and UI layers instead.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("Student with ID {0} already exists.")]
    DuplicateStudent(String),

    #[error("Course with code {0} already exists.")]
    DuplicateCourse(String),

    #[error("Student with ID {0} not found.")]
    StudentNotFound(String),

    #[error("Course with code {0} not found.")]
    CourseNotFound(String),

    #[error("Student {student} is already enrolled in course {course}.")]
    AlreadyEnrolled { student: String, course: String },

    #[error("Unknown student type: {0}. Use 'Undergraduate' or 'Postgraduate'.")]
    InvalidKind(String),
}
