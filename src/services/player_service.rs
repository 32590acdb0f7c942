//! Player management.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{NewPlayer, Player};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::repositories::{player_not_found, team_not_found};
use crate::infra::UnitOfWork;

#[async_trait]
pub trait PlayerService: Send + Sync {
    /// All players, or only those of `team_id`.
    async fn list_players(&self, team_id: Option<i64>) -> AppResult<Vec<Player>>;

    async fn get_player(&self, id: i64) -> AppResult<Player>;

    async fn create_player(&self, player: NewPlayer) -> AppResult<Player>;

    async fn update_player(&self, id: i64, player: NewPlayer) -> AppResult<Player>;

    async fn delete_player(&self, id: i64) -> AppResult<()>;
}

pub struct PlayerManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> PlayerManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    async fn check_player(&self, player: &NewPlayer) -> AppResult<()> {
        player.validate()?;

        if let Some(team_id) = player.team_id {
            if self.uow.teams().find_by_id(team_id).await?.is_none() {
                return Err(AppError::not_found(team_not_found(team_id)));
            }
        }
        Ok(())
    }
}

#[async_trait]
impl<U: UnitOfWork> PlayerService for PlayerManager<U> {
    async fn list_players(&self, team_id: Option<i64>) -> AppResult<Vec<Player>> {
        match team_id {
            Some(team_id) => self.uow.players().list_by_team(team_id).await,
            None => self.uow.players().list().await,
        }
    }

    async fn get_player(&self, id: i64) -> AppResult<Player> {
        self.uow
            .players()
            .find_by_id(id)
            .await?
            .ok_or_not_found(|| player_not_found(id))
    }

    async fn create_player(&self, player: NewPlayer) -> AppResult<Player> {
        self.check_player(&player).await?;

        let created = self.uow.players().create(player).await?;
        tracing::info!(player_id = created.id, team_id = ?created.team_id, "Player created");
        Ok(created)
    }

    async fn update_player(&self, id: i64, player: NewPlayer) -> AppResult<Player> {
        self.get_player(id).await?;
        self.check_player(&player).await?;

        self.uow.players().update(id, player).await
    }

    async fn delete_player(&self, id: i64) -> AppResult<()> {
        self.uow.players().delete(id).await?;
        tracing::info!(player_id = id, "Player deleted");
        Ok(())
    }
}
