//! Command-line interface.
//!
//! - `serve` starts the HTTP server
//! - `migrate` manages the database schema
//! - `stats` imports or exports a match box score as CSV

pub mod args;

pub use args::{Cli, Commands};
