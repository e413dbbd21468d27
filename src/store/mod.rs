//! Flat-text persistence split across logical submodules: path derivation
//! plus one codec per file. Saving is a truncating overwrite; loading
//! rebuilds the registry through the same duplicate-checking paths live
//! mutations use, so a corrupt or duplicated row degrades to a skipped row
//! instead of aborting the load.

mod courses;
mod paths;
mod students;

pub use courses::{load_courses, save_courses};
pub use paths::StorePaths;
pub use students::{load_students, save_students};

use anyhow::Result;

use crate::registry::Registry;

/// Per-file tally of what a load actually did. Skipped rows cover both
/// malformed lines and duplicate keys.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LoadOutcome {
    pub loaded: usize,
    pub skipped: usize,
}

/// Combined tally for a full registry load.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LoadSummary {
    pub students: LoadOutcome,
    pub courses: LoadOutcome,
}

impl LoadSummary {
    pub fn skipped_rows(&self) -> usize {
        self.students.skipped + self.courses.skipped
    }
}

/// Load both files into a fresh registry, students first as in the original
/// layout. Either file may be absent.
pub fn load_registry(paths: &StorePaths) -> Result<(Registry, LoadSummary)> {
    let mut registry = Registry::new();
    let students = load_students(&mut registry, paths)?;
    let courses = load_courses(&mut registry, paths)?;
    Ok((registry, LoadSummary { students, courses }))
}

/// Write both files. The registry is untouched; a failure mid-way leaves at
/// most the students file rewritten, which the next save repairs.
pub fn save_registry(registry: &Registry, paths: &StorePaths) -> Result<()> {
    save_students(registry, paths)?;
    save_courses(registry, paths)?;
    Ok(())
}
