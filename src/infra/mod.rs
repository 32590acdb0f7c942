//! Infrastructure layer - External systems integration
//!
//! - PostgreSQL connection, migrations and repositories
//! - Redis cache (rate limiting, standings)
//! - Unit of Work for transaction management

pub mod cache;
pub mod db;
pub mod repositories;
pub mod unit_of_work;

pub use cache::{Cache, RateLimiter, StandingsCache};
pub use db::{Database, Migrator};
pub use repositories::{
    MatchRepository, PlayerRepository, SeasonRepository, StatsRepository, TeamRepository,
    UserRepository,
};
pub use unit_of_work::{Persistence, TransactionContext, TxFuture, TxStatsRepository, UnitOfWork};

#[cfg(any(test, feature = "test-utils"))]
pub use cache::{MockRateLimiter, MockStandingsCache};
