//! Match repository.

use async_trait::async_trait;
use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use super::entities::matches::{self, ActiveModel, Entity as MatchEntity};
use crate::domain::{Match, NewMatch};
use crate::errors::{AppError, AppResult, OptionExt};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait MatchRepository: Send + Sync {
    /// All matches ordered by date.
    async fn list(&self) -> AppResult<Vec<Match>>;

    async fn list_by_date(&self, date: NaiveDate) -> AppResult<Vec<Match>>;

    async fn list_by_season(&self, season_id: i64) -> AppResult<Vec<Match>>;

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Match>>;

    async fn create(&self, new_match: NewMatch) -> AppResult<Match>;

    async fn update(&self, id: i64, new_match: NewMatch) -> AppResult<Match>;

    async fn delete(&self, id: i64) -> AppResult<()>;
}

pub struct MatchStore {
    db: DatabaseConnection,
}

impl MatchStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

pub(crate) fn match_not_found(id: i64) -> String {
    format!("Match not found: {}", id)
}

fn apply(active: &mut ActiveModel, new_match: NewMatch) {
    active.home_team_score = Set(new_match.home_score());
    active.away_team_score = Set(new_match.away_score());
    active.season_id = Set(new_match.season_id);
    active.date = Set(new_match.date);
    active.home_team_id = Set(new_match.home_team_id);
    active.away_team_id = Set(new_match.away_team_id);
}

#[async_trait]
impl MatchRepository for MatchStore {
    async fn list(&self) -> AppResult<Vec<Match>> {
        let models = MatchEntity::find()
            .order_by_asc(matches::Column::Date)
            .order_by_asc(matches::Column::Id)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Match::from).collect())
    }

    async fn list_by_date(&self, date: NaiveDate) -> AppResult<Vec<Match>> {
        let models = MatchEntity::find()
            .filter(matches::Column::Date.eq(date))
            .order_by_asc(matches::Column::Id)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Match::from).collect())
    }

    async fn list_by_season(&self, season_id: i64) -> AppResult<Vec<Match>> {
        let models = MatchEntity::find()
            .filter(matches::Column::SeasonId.eq(season_id))
            .order_by_asc(matches::Column::Date)
            .order_by_asc(matches::Column::Id)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Match::from).collect())
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Match>> {
        let result = MatchEntity::find_by_id(id).one(&self.db).await?;
        Ok(result.map(Match::from))
    }

    async fn create(&self, new_match: NewMatch) -> AppResult<Match> {
        let mut active = <ActiveModel as ActiveModelTrait>::default();
        apply(&mut active, new_match);

        let model = active.insert(&self.db).await?;
        Ok(Match::from(model))
    }

    async fn update(&self, id: i64, new_match: NewMatch) -> AppResult<Match> {
        let existing = MatchEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_not_found(|| match_not_found(id))?;

        let mut active: ActiveModel = existing.into();
        apply(&mut active, new_match);

        let model = active.update(&self.db).await?;
        Ok(Match::from(model))
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        let result = MatchEntity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(AppError::not_found(match_not_found(id)));
        }
        Ok(())
    }
}
