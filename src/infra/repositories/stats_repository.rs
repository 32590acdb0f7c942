//! Player statistics repository.
//!
//! The query helpers are generic over [`ConnectionTrait`] so the same code
//! runs on the pool and inside a transaction.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set,
};

use super::entities::player_stats::{self, ActiveModel, Entity as StatsEntity};
use crate::domain::{PlayerStats, StatLine};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait StatsRepository: Send + Sync {
    /// Stat lines of one match ordered by player id.
    async fn list_by_match(&self, match_id: i64) -> AppResult<Vec<PlayerStats>>;

    async fn find(&self, match_id: i64, player_id: i64) -> AppResult<Option<PlayerStats>>;

    /// Insert a new line; an existing (match, player) pair is a conflict.
    async fn create(&self, match_id: i64, line: StatLine) -> AppResult<PlayerStats>;

    async fn delete(&self, match_id: i64, player_id: i64) -> AppResult<()>;
}

pub struct StatsStore {
    db: DatabaseConnection,
}

impl StatsStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

pub(crate) async fn find_line<C: ConnectionTrait>(
    conn: &C,
    match_id: i64,
    player_id: i64,
) -> AppResult<Option<player_stats::Model>> {
    let model = StatsEntity::find()
        .filter(player_stats::Column::MatchId.eq(match_id))
        .filter(player_stats::Column::PlayerId.eq(player_id))
        .one(conn)
        .await?;

    Ok(model)
}

pub(crate) async fn insert_line<C: ConnectionTrait>(
    conn: &C,
    match_id: i64,
    line: &StatLine,
) -> AppResult<PlayerStats> {
    let mut active = ActiveModel {
        match_id: Set(match_id),
        ..Default::default()
    };
    active.apply_line(line);

    let model = active.insert(conn).await?;
    Ok(PlayerStats::from(model))
}

/// Insert or overwrite the line for (match, player).
pub(crate) async fn upsert_line<C: ConnectionTrait>(
    conn: &C,
    match_id: i64,
    line: &StatLine,
) -> AppResult<PlayerStats> {
    match find_line(conn, match_id, line.player_id).await? {
        Some(existing) => {
            let mut active: ActiveModel = existing.into();
            active.apply_line(line);
            let model = active.update(conn).await?;
            Ok(PlayerStats::from(model))
        }
        None => insert_line(conn, match_id, line).await,
    }
}

#[async_trait]
impl StatsRepository for StatsStore {
    async fn list_by_match(&self, match_id: i64) -> AppResult<Vec<PlayerStats>> {
        let models = StatsEntity::find()
            .filter(player_stats::Column::MatchId.eq(match_id))
            .order_by_asc(player_stats::Column::PlayerId)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(PlayerStats::from).collect())
    }

    async fn find(&self, match_id: i64, player_id: i64) -> AppResult<Option<PlayerStats>> {
        let model = find_line(&self.db, match_id, player_id).await?;
        Ok(model.map(PlayerStats::from))
    }

    async fn create(&self, match_id: i64, line: StatLine) -> AppResult<PlayerStats> {
        insert_line(&self.db, match_id, &line).await
    }

    async fn delete(&self, match_id: i64, player_id: i64) -> AppResult<()> {
        let result = StatsEntity::delete_many()
            .filter(player_stats::Column::MatchId.eq(match_id))
            .filter(player_stats::Column::PlayerId.eq(player_id))
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(AppError::not_found(format!(
                "Stats not found for player {} in match {}",
                player_id, match_id
            )));
        }
        Ok(())
    }
}
