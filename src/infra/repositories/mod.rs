//! Repository layer - Data access abstraction
//!
//! One trait per aggregate with a SeaORM-backed store. Services depend on
//! the traits so they can be tested against mockall doubles.

pub(crate) mod entities;
mod match_repository;
mod player_repository;
mod season_repository;
mod stats_repository;
mod team_repository;
mod user_repository;

pub use match_repository::{MatchRepository, MatchStore};
pub use player_repository::{PlayerRepository, PlayerStore};
pub use season_repository::{SeasonRepository, SeasonStore};
pub use stats_repository::{StatsRepository, StatsStore};
pub use team_repository::{TeamRepository, TeamStore};
pub use user_repository::{UserRepository, UserStore};

pub(crate) use match_repository::match_not_found;
pub(crate) use player_repository::player_not_found;
pub(crate) use season_repository::season_not_found;
pub(crate) use stats_repository::upsert_line;
pub(crate) use team_repository::team_not_found;

// Export mocks for tests (both unit and integration)
#[cfg(any(test, feature = "test-utils"))]
pub use match_repository::MockMatchRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use player_repository::MockPlayerRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use season_repository::MockSeasonRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use stats_repository::MockStatsRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use team_repository::MockTeamRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use user_repository::MockUserRepository;
