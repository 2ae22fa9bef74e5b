//! Core library surface for the Medicine Manager TUI application.
//!
//! The record store and report generator carry no UI concerns, so the `bin`
//! target and the integration tests drive exactly the same code.
pub mod config;
pub mod models;
pub mod report;
pub mod store;
pub mod ui;

/// Domain types manipulated by every layer.
pub use models::{CountInput, Gender, Medicine, ParseGenderError, Patient};

/// The in-memory record store and its validation errors.
pub use store::{RecordError, RecordStore};

/// Text report over the current store contents.
pub use report::generate_report;

/// The interactive application entry point and state container.
pub use ui::{run_app, App};
