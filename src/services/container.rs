//! Service container and concurrency helpers shared by the services.

use std::future::Future;
use std::sync::Arc;

use super::{
    AuthService, Authenticator, MatchManager, MatchService, PlayerManager, PlayerService,
    SeasonManager, SeasonService, StandingsCalculator, StandingsService, StatsManager,
    StatsService, TeamManager, TeamService, UserManager, UserService,
};
use crate::config::Config;
use crate::infra::{Persistence, StandingsCache};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Access to every application service.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
pub trait ServiceContainer: Send + Sync {
    fn auth(&self) -> Arc<dyn AuthService>;

    fn users(&self) -> Arc<dyn UserService>;

    fn seasons(&self) -> Arc<dyn SeasonService>;

    fn teams(&self) -> Arc<dyn TeamService>;

    fn players(&self) -> Arc<dyn PlayerService>;

    fn matches(&self) -> Arc<dyn MatchService>;

    fn stats(&self) -> Arc<dyn StatsService>;

    fn standings(&self) -> Arc<dyn StandingsService>;
}

#[derive(Clone)]
pub struct Services {
    auth_service: Arc<dyn AuthService>,
    user_service: Arc<dyn UserService>,
    season_service: Arc<dyn SeasonService>,
    team_service: Arc<dyn TeamService>,
    player_service: Arc<dyn PlayerService>,
    match_service: Arc<dyn MatchService>,
    stats_service: Arc<dyn StatsService>,
    standings_service: Arc<dyn StandingsService>,
}

impl Services {
    /// Wire every service over one SeaORM-backed Unit of Work.
    pub fn from_connection(
        db: sea_orm::DatabaseConnection,
        config: Config,
        standings_cache: Arc<dyn StandingsCache>,
    ) -> Self {
        let uow = Arc::new(Persistence::new(db));

        Self {
            auth_service: Arc::new(Authenticator::new(uow.clone(), config)),
            user_service: Arc::new(UserManager::new(uow.clone())),
            season_service: Arc::new(SeasonManager::new(uow.clone())),
            team_service: Arc::new(TeamManager::new(uow.clone())),
            player_service: Arc::new(PlayerManager::new(uow.clone())),
            match_service: Arc::new(MatchManager::new(uow.clone(), standings_cache.clone())),
            stats_service: Arc::new(StatsManager::new(uow.clone())),
            standings_service: Arc::new(StandingsCalculator::new(uow, standings_cache)),
        }
    }
}

impl ServiceContainer for Services {
    fn auth(&self) -> Arc<dyn AuthService> {
        self.auth_service.clone()
    }

    fn users(&self) -> Arc<dyn UserService> {
        self.user_service.clone()
    }

    fn seasons(&self) -> Arc<dyn SeasonService> {
        self.season_service.clone()
    }

    fn teams(&self) -> Arc<dyn TeamService> {
        self.team_service.clone()
    }

    fn players(&self) -> Arc<dyn PlayerService> {
        self.player_service.clone()
    }

    fn matches(&self) -> Arc<dyn MatchService> {
        self.match_service.clone()
    }

    fn stats(&self) -> Arc<dyn StatsService> {
        self.stats_service.clone()
    }

    fn standings(&self) -> Arc<dyn StandingsService> {
        self.standings_service.clone()
    }
}

/// Run independent async operations concurrently.
pub mod parallel {
    use super::*;
    use crate::errors::AppResult;
    use tokio::try_join;

    /// Await both futures together, failing fast on the first error.
    pub async fn join2<F1, F2, T1, T2>(f1: F1, f2: F2) -> AppResult<(T1, T2)>
    where
        F1: Future<Output = AppResult<T1>>,
        F2: Future<Output = AppResult<T2>>,
    {
        try_join!(f1, f2)
    }

    /// Await a homogeneous batch, keeping input order.
    pub async fn join_all<F, T>(futures: Vec<F>) -> AppResult<Vec<T>>
    where
        F: Future<Output = AppResult<T>>,
    {
        let results = futures::future::join_all(futures).await;
        results.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{AppError, AppResult};

    #[tokio::test]
    async fn test_parallel_join2() {
        async fn op1() -> AppResult<i32> {
            Ok(1)
        }
        async fn op2() -> AppResult<&'static str> {
            Ok("two")
        }

        let (a, b) = parallel::join2(op1(), op2()).await.unwrap();
        assert_eq!((a, b), (1, "two"));
    }

    #[tokio::test]
    async fn test_parallel_join_all_keeps_order_and_fails_fast() {
        let futures: Vec<_> = (0..5).map(|i| async move { Ok(i) as AppResult<i32> }).collect();
        assert_eq!(parallel::join_all(futures).await.unwrap(), vec![0, 1, 2, 3, 4]);

        let failing: Vec<_> = (0..3)
            .map(|i| async move {
                if i == 1 {
                    Err(AppError::internal("boom"))
                } else {
                    Ok(i)
                }
            })
            .collect();
        assert!(parallel::join_all(failing).await.is_err());
    }
}
