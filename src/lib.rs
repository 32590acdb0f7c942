//! Basketball league REST API.
//!
//! Seasons, teams, players and matches with per-match player statistics,
//! CSV import/export of box scores, JWT authentication and cached season
//! standings.
//!
//! # Architecture Layers
//!
//! - **cli** / **commands**: command-line interface and its implementations
//! - **config**: environment configuration and constants
//! - **domain**: league entities and rules, no I/O
//! - **services**: use cases behind traits
//! - **infra**: PostgreSQL (SeaORM), migrations, Redis, Unit of Work
//! - **api**: axum handlers, middleware, routes and OpenAPI
//! - **types**: shared response types
//! - **utils**: CSV reading and writing
//! - **errors**: `AppError` and its HTTP mapping
//!
//! # CLI Usage
//!
//! ```bash
//! cargo run -- serve --port 8080
//! cargo run -- migrate up
//! cargo run -- stats import --match 3 box_score.csv
//! cargo run -- stats export --match 3 --output box_score.csv
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;
pub mod types;
pub mod utils;

pub use api::AppState;
pub use config::Config;
pub use domain::{Password, Role, User};
pub use errors::{AppError, AppResult};
pub use infra::{Cache, Database};
