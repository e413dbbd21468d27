//! Core library surface for the Student Roster Manager TUI application.
//!
//! The public modules exposed here provide an intentionally small API so the
//! `bin` target as well as the integration tests can reuse the same pieces:
//! the registry holds the relational state, the store round-trips it through
//! the flat-file format, and the report module projects slices of it.

pub mod error;
pub mod models;
pub mod registry;
pub mod reports;
pub mod store;
pub mod ui;

/// The error taxonomy every core operation reports through.
pub use error::RegistryError;

/// The primary domain types other layers manipulate.
pub use models::{Course, Student, StudentKind};

/// The owning collection of all students and courses.
pub use registry::Registry;

/// Persistence entry points used by `main.rs` and the export action.
pub use store::{load_registry, save_registry, StorePaths};

/// The interactive application entry point and state container.
pub use ui::{run_app, App};
