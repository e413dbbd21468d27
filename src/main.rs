//! Binary entry point that glues the flat-file store to the TUI. The
//! bootstrapping pipeline: resolve the data directory, load any prior state,
//! drive the Ratatui event loop until the user exits, then write the full
//! state back out. That final save is the only autosave; individual
//! mutations stay in memory until it runs (or the user exports manually).
use student_roster_manager::{load_registry, run_app, save_registry, App, StorePaths};

fn main() -> anyhow::Result<()> {
    let paths = StorePaths::in_home()?;
    let (registry, summary) = load_registry(&paths)?;

    let mut app = App::new(registry, paths, summary);
    run_app(&mut app)?;

    save_registry(app.registry(), app.paths())
}
