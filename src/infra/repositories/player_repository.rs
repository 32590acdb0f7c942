//! Player repository.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use super::entities::player::{self, ActiveModel, Entity as PlayerEntity};
use crate::domain::{NewPlayer, Player};
use crate::errors::{AppError, AppResult, OptionExt};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait PlayerRepository: Send + Sync {
    async fn list(&self) -> AppResult<Vec<Player>>;

    async fn list_by_team(&self, team_id: i64) -> AppResult<Vec<Player>>;

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Player>>;

    async fn create(&self, player: NewPlayer) -> AppResult<Player>;

    /// Full replacement; a `None` team turns the player into a free agent.
    async fn update(&self, id: i64, player: NewPlayer) -> AppResult<Player>;

    async fn delete(&self, id: i64) -> AppResult<()>;
}

pub struct PlayerStore {
    db: DatabaseConnection,
}

impl PlayerStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

pub(crate) fn player_not_found(id: i64) -> String {
    format!("Player not found with id: {}", id)
}

fn apply(active: &mut ActiveModel, player: NewPlayer) {
    active.team_id = Set(player.team_id);
    active.first_name = Set(player.first_name);
    active.last_name = Set(player.last_name);
    active.position = Set(player.position);
    active.age = Set(player.age);
    active.height = Set(player.height);
    active.weight = Set(player.weight);
}

#[async_trait]
impl PlayerRepository for PlayerStore {
    async fn list(&self) -> AppResult<Vec<Player>> {
        let models = PlayerEntity::find()
            .order_by_asc(player::Column::Id)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Player::from).collect())
    }

    async fn list_by_team(&self, team_id: i64) -> AppResult<Vec<Player>> {
        let models = PlayerEntity::find()
            .filter(player::Column::TeamId.eq(team_id))
            .order_by_asc(player::Column::Id)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Player::from).collect())
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Player>> {
        let result = PlayerEntity::find_by_id(id).one(&self.db).await?;
        Ok(result.map(Player::from))
    }

    async fn create(&self, player: NewPlayer) -> AppResult<Player> {
        let mut active = <ActiveModel as ActiveModelTrait>::default();
        apply(&mut active, player);

        let model = active.insert(&self.db).await?;
        Ok(Player::from(model))
    }

    async fn update(&self, id: i64, player: NewPlayer) -> AppResult<Player> {
        let existing = PlayerEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_not_found(|| player_not_found(id))?;

        let mut active: ActiveModel = existing.into();
        apply(&mut active, player);

        let model = active.update(&self.db).await?;
        Ok(Player::from(model))
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        let result = PlayerEntity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(AppError::not_found(player_not_found(id)));
        }
        Ok(())
    }
}
