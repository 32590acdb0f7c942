//! Application services layer - Use cases and business logic.
//!
//! Each service is a trait plus an implementation generic over
//! [`UnitOfWork`](crate::infra::UnitOfWork), so handlers depend on traits
//! and services are tested against mock repositories.

mod auth_service;
pub mod container;
mod match_service;
mod player_service;
mod season_service;
mod standings_service;
mod stats_service;
mod team_service;
mod user_service;

#[cfg(test)]
pub(crate) mod testing;

pub use container::{parallel, ServiceContainer, Services};

pub use auth_service::{AuthService, Authenticator, Claims, TokenResponse};
pub use match_service::{MatchFilter, MatchManager, MatchService};
pub use player_service::{PlayerManager, PlayerService};
pub use season_service::{SeasonManager, SeasonService};
pub use standings_service::{StandingsCalculator, StandingsService};
pub use stats_service::{StatsManager, StatsService};
pub use team_service::{TeamManager, TeamService};
pub use user_service::{UserManager, UserService};

#[cfg(any(test, feature = "test-utils"))]
pub use container::MockServiceContainer;
