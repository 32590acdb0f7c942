//! SeaORM entity definitions
//!
//! These are database-specific entities separate from domain models.

pub mod matches;
pub mod player;
pub mod player_stats;
pub mod season;
pub mod team;
pub mod user;
