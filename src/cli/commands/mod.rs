//! CLI command handlers for `guru`.
//!
//! Each command is implemented in its own submodule. Session handlers return
//! a user-facing `✗ …` message on failure; `main` prints it.

pub mod config;
pub mod course;
pub mod report;
pub mod reset;
pub mod semester;
pub mod summary;
