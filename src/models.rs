//! Domain models shared by the registry, the flat-file store, and the TUI.
//! The intent is that these types stay light-weight data holders so other
//! layers can focus on presentation and persistence logic. Keeping the
//! commentary here means later refactors can reconstruct the assumptions even
//! if other context is lost.

use std::fmt;

use crate::error::RegistryError;

/// Closed set of student categories. The two kinds differ only by the label
/// printed in listings and reports, so a plain enum replaces any deeper
/// hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StudentKind {
    Undergraduate,
    Postgraduate,
}

impl StudentKind {
    /// Stable label used in listings, reports, and the persisted files.
    pub fn label(&self) -> &'static str {
        match self {
            StudentKind::Undergraduate => "Undergraduate",
            StudentKind::Postgraduate => "Postgraduate",
        }
    }

    /// Parse a textual label back into a kind. Used at the two boundaries
    /// where kinds arrive as strings: the input form and the students file.
    pub fn parse(label: &str) -> Result<Self, RegistryError> {
        match label {
            "Undergraduate" => Ok(StudentKind::Undergraduate),
            "Postgraduate" => Ok(StudentKind::Postgraduate),
            other => Err(RegistryError::InvalidKind(other.to_string())),
        }
    }
}

impl fmt::Display for StudentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone)]
/// One tracked student. `courses` is the transcript: course codes in the
/// order they were enrolled, never duplicated. The registry alone mutates it
/// so the symmetry with course rosters cannot drift.
pub struct Student {
    /// Externally supplied id in the `Sxxx` format. Primary key.
    pub id: String,
    /// Display name shown in lists and reports.
    pub name: String,
    pub kind: StudentKind,
    /// Enrolled course codes, insertion order preserved for display.
    pub courses: Vec<String>,
}

impl Student {
    pub fn new(id: String, name: String, kind: StudentKind) -> Self {
        Self {
            id,
            name,
            kind,
            courses: Vec::new(),
        }
    }

    /// One-line summary used by the list and search views.
    pub fn summary(&self) -> String {
        format!("{}  {}  ({})", self.id, self.name, self.kind)
    }
}

#[derive(Debug, Clone)]
/// One tracked course. `students` is the roster: enrolled student ids in
/// enrollment order, never duplicated.
pub struct Course {
    /// Externally supplied course code. Primary key.
    pub code: String,
    pub name: String,
    /// Enrolled student ids, insertion order preserved for display.
    pub students: Vec<String>,
}

impl Course {
    pub fn new(code: String, name: String) -> Self {
        Self {
            code,
            name,
            students: Vec::new(),
        }
    }

    pub fn summary(&self) -> String {
        format!("{}  {}", self.code, self.name)
    }
}
