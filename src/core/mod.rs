//! Core GPA engine: models, calculations, session state, persistence and reports

pub mod config;
pub mod error;
pub mod gpa;
pub mod models;
pub mod report;
pub mod session;
pub mod store;
pub mod templates;
pub mod validation;

/// Returns the current version of the `gpa-guru` crate
#[must_use]
pub const fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
