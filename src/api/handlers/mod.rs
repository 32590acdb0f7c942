//! HTTP request handlers.

pub mod auth_handler;
pub mod health_handler;
pub mod match_handler;
pub mod player_handler;
pub mod season_handler;
pub mod stats_handler;
pub mod team_handler;
pub mod user_handler;

pub use auth_handler::auth_routes;
pub use match_handler::match_routes;
pub use player_handler::player_routes;
pub use season_handler::season_routes;
pub use team_handler::team_routes;
pub use user_handler::user_routes;
