//! Unit of Work: one access point for every repository plus
//! closure-scoped transactions.
//!
//! Services hold an `Arc<U: UnitOfWork>` and never see a connection
//! directly. Multi-row writes that must succeed or fail together (CSV stat
//! imports) go through [`UnitOfWork::transaction`].

use async_trait::async_trait;
use sea_orm::{
    AccessMode, DatabaseConnection, DatabaseTransaction, IsolationLevel, TransactionTrait,
};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use super::repositories::{
    upsert_line, MatchRepository, MatchStore, PlayerRepository, PlayerStore, SeasonRepository,
    SeasonStore, StatsRepository, StatsStore, TeamRepository, TeamStore, UserRepository, UserStore,
};
use crate::domain::{PlayerStats, StatLine};
use crate::errors::{AppError, AppResult};

/// Boxed future returned by transaction closures.
pub type TxFuture<'a, T> = Pin<Box<dyn Future<Output = AppResult<T>> + Send + 'a>>;

/// Repository access and transaction management.
///
/// Not mockable directly because of the generic transaction method; tests
/// implement it over mockall repositories instead.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    fn users(&self) -> Arc<dyn UserRepository>;

    fn seasons(&self) -> Arc<dyn SeasonRepository>;

    fn teams(&self) -> Arc<dyn TeamRepository>;

    fn players(&self) -> Arc<dyn PlayerRepository>;

    fn matches(&self) -> Arc<dyn MatchRepository>;

    fn stats(&self) -> Arc<dyn StatsRepository>;

    /// Run `f` inside a ReadCommitted transaction, committing on `Ok` and
    /// rolling back on `Err`.
    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> TxFuture<'a, T> + Send,
        T: Send;
}

/// Repository access bound to one open transaction.
pub struct TransactionContext<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TransactionContext<'a> {
    fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    pub fn stats(&self) -> TxStatsRepository<'_> {
        TxStatsRepository { txn: self.txn }
    }
}

/// SeaORM-backed [`UnitOfWork`].
pub struct Persistence {
    db: DatabaseConnection,
    user_repo: Arc<UserStore>,
    season_repo: Arc<SeasonStore>,
    team_repo: Arc<TeamStore>,
    player_repo: Arc<PlayerStore>,
    match_repo: Arc<MatchStore>,
    stats_repo: Arc<StatsStore>,
}

impl Persistence {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            user_repo: Arc::new(UserStore::new(db.clone())),
            season_repo: Arc::new(SeasonStore::new(db.clone())),
            team_repo: Arc::new(TeamStore::new(db.clone())),
            player_repo: Arc::new(PlayerStore::new(db.clone())),
            match_repo: Arc::new(MatchStore::new(db.clone())),
            stats_repo: Arc::new(StatsStore::new(db.clone())),
            db,
        }
    }
}

#[async_trait]
impl UnitOfWork for Persistence {
    fn users(&self) -> Arc<dyn UserRepository> {
        self.user_repo.clone()
    }

    fn seasons(&self) -> Arc<dyn SeasonRepository> {
        self.season_repo.clone()
    }

    fn teams(&self) -> Arc<dyn TeamRepository> {
        self.team_repo.clone()
    }

    fn players(&self) -> Arc<dyn PlayerRepository> {
        self.player_repo.clone()
    }

    fn matches(&self) -> Arc<dyn MatchRepository> {
        self.match_repo.clone()
    }

    fn stats(&self) -> Arc<dyn StatsRepository> {
        self.stats_repo.clone()
    }

    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> TxFuture<'a, T> + Send,
        T: Send,
    {
        let txn = self
            .db
            .begin_with_config(
                Some(IsolationLevel::ReadCommitted),
                Some(AccessMode::ReadWrite),
            )
            .await
            .map_err(AppError::from)?;

        let ctx = TransactionContext::new(&txn);

        match f(ctx).await {
            Ok(result) => {
                txn.commit().await.map_err(AppError::from)?;
                Ok(result)
            }
            Err(e) => {
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::error!(error = %rollback_err, "Transaction rollback failed");
                }
                Err(e)
            }
        }
    }
}

/// Stat-line writes that take part in the surrounding transaction.
pub struct TxStatsRepository<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TxStatsRepository<'a> {
    pub async fn upsert(&self, match_id: i64, line: &StatLine) -> AppResult<PlayerStats> {
        upsert_line(self.txn, match_id, line).await
    }
}

/// Run a block inside a transaction without spelling out `Box::pin`.
#[macro_export]
macro_rules! with_transaction {
    ($uow:expr, |$ctx:ident| $body:expr) => {
        $uow.transaction(|$ctx| Box::pin(async move { $body })).await
    };
}
