//! In-memory Unit of Work over mockall repositories for service tests.

use async_trait::async_trait;
use std::sync::Arc;

use crate::errors::{AppError, AppResult};
use crate::infra::repositories::{
    MockMatchRepository, MockPlayerRepository, MockSeasonRepository, MockStatsRepository,
    MockTeamRepository, MockUserRepository,
};
use crate::infra::{
    MatchRepository, PlayerRepository, SeasonRepository, StatsRepository, TeamRepository,
    TransactionContext, TxFuture, UnitOfWork, UserRepository,
};

/// Mocks to configure before building a [`TestUnitOfWork`].
#[derive(Default)]
pub(crate) struct MockRepos {
    pub users: MockUserRepository,
    pub seasons: MockSeasonRepository,
    pub teams: MockTeamRepository,
    pub players: MockPlayerRepository,
    pub matches: MockMatchRepository,
    pub stats: MockStatsRepository,
}

impl MockRepos {
    pub fn into_uow(self) -> Arc<TestUnitOfWork> {
        Arc::new(TestUnitOfWork {
            users: Arc::new(self.users),
            seasons: Arc::new(self.seasons),
            teams: Arc::new(self.teams),
            players: Arc::new(self.players),
            matches: Arc::new(self.matches),
            stats: Arc::new(self.stats),
        })
    }
}

pub(crate) struct TestUnitOfWork {
    users: Arc<MockUserRepository>,
    seasons: Arc<MockSeasonRepository>,
    teams: Arc<MockTeamRepository>,
    players: Arc<MockPlayerRepository>,
    matches: Arc<MockMatchRepository>,
    stats: Arc<MockStatsRepository>,
}

#[async_trait]
impl UnitOfWork for TestUnitOfWork {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.users.clone()
    }

    fn seasons(&self) -> Arc<dyn SeasonRepository> {
        self.seasons.clone()
    }

    fn teams(&self) -> Arc<dyn TeamRepository> {
        self.teams.clone()
    }

    fn players(&self) -> Arc<dyn PlayerRepository> {
        self.players.clone()
    }

    fn matches(&self) -> Arc<dyn MatchRepository> {
        self.matches.clone()
    }

    fn stats(&self) -> Arc<dyn StatsRepository> {
        self.stats.clone()
    }

    async fn transaction<F, T>(&self, _f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> TxFuture<'a, T> + Send,
        T: Send,
    {
        Err(AppError::internal("Transactions not supported in test mock"))
    }
}
