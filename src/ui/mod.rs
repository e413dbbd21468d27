//! Interactive shell split across logical submodules: application state and
//! drawing, form state, per-screen state, and the terminal event loop.

mod app;
mod forms;
mod helpers;
mod screens;
mod terminal;

pub use app::App;
pub use terminal::run_app;
