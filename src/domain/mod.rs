//! Domain layer - Core league entities and rules
//!
//! This module contains the models that represent basketball league
//! concepts independent of infrastructure concerns.
//!
//! The domain layer performs no I/O; invariants that need the database
//! (uniqueness, overlap) are enforced by the services.

pub mod matches;
pub mod password;
pub mod player;
pub mod season;
pub mod standings;
pub mod stats;
pub mod team;
pub mod user;

pub use matches::{Match, MatchResponse, NewMatch};
pub use password::Password;
pub use player::{NewPlayer, Player, PlayerResponse};
pub use season::{NewSeason, Season, SeasonResponse};
pub use standings::{compute_standings, Standing};
pub use stats::{PlayerStats, PlayerStatsResponse, StatLine};
pub use team::{NewTeam, Team, TeamResponse};
pub use user::{Role, UpdateUser, User, UserResponse};
