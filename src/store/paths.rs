use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};
use directories::BaseDirs;

/// Folder name used beneath the user's home directory for application data.
const DATA_DIR_NAME: &str = ".student-roster-manager";
/// Students file, stored inside its own subdirectory.
const STUDENTS_DIR: &str = "Students";
const STUDENTS_FILE: &str = "students.csv";
/// Courses file, likewise.
const COURSES_DIR: &str = "Courses";
const COURSES_FILE: &str = "courses.csv";
/// Report files are grouped by report type under a shared parent.
const REPORTS_DIR: &str = "Reports";
const COURSE_REPORTS_DIR: &str = "CourseReports";
const STUDENT_REPORTS_DIR: &str = "StudentReports";

/// Root of the on-disk layout plus the derivation of every file path under
/// it. Production code resolves the root inside the user's home; tests point
/// it at a temporary directory instead.
#[derive(Debug, Clone)]
pub struct StorePaths {
    root: PathBuf,
}

impl StorePaths {
    /// Resolve the default data root inside the user's home directory.
    pub fn in_home() -> Result<Self> {
        let base_dirs =
            BaseDirs::new().ok_or_else(|| anyhow!("could not locate home directory"))?;
        Ok(Self {
            root: base_dirs.home_dir().join(DATA_DIR_NAME),
        })
    }

    /// Use an explicit root. Directories are created lazily at save time.
    pub fn at_root(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn students_file(&self) -> PathBuf {
        self.root.join(STUDENTS_DIR).join(STUDENTS_FILE)
    }

    pub fn courses_file(&self) -> PathBuf {
        self.root.join(COURSES_DIR).join(COURSES_FILE)
    }

    /// Report path derived from the course code, e.g.
    /// `Reports/CourseReports/CSE102.csv`.
    pub fn course_report_file(&self, code: &str) -> PathBuf {
        self.root
            .join(REPORTS_DIR)
            .join(COURSE_REPORTS_DIR)
            .join(format!("{code}.csv"))
    }

    /// Report path derived from the student id, e.g.
    /// `Reports/StudentReports/S001.csv`.
    pub fn student_report_file(&self, id: &str) -> PathBuf {
        self.root
            .join(REPORTS_DIR)
            .join(STUDENT_REPORTS_DIR)
            .join(format!("{id}.csv"))
    }
}
