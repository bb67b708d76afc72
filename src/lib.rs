//! countryscope - searchable, filterable country table for the terminal.
//!
//! The crate fetches country records from a remote endpoint, runs them
//! through a pure filter pipeline (name substring + population bucket) and
//! renders the result as a table, either interactively or to stdout.

pub mod cli;
pub mod config;
pub mod filter;
pub mod models;
pub mod services;
pub mod state;
pub mod ui;
