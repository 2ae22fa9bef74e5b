//! Ratatui front-end: three tabs over the record store plus modal forms.

mod app;
mod forms;
mod helpers;
mod screens;
mod terminal;

pub use app::App;
pub use terminal::run_app;
