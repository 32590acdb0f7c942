//! Season repository.

use async_trait::async_trait;
use chrono::NaiveDate;
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

use super::entities::season::{self, ActiveModel, Entity as SeasonEntity};
use crate::domain::{NewSeason, Season};
use crate::errors::{AppError, AppResult, OptionExt};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait SeasonRepository: Send + Sync {
    /// All seasons, earliest first.
    async fn list(&self) -> AppResult<Vec<Season>>;

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Season>>;

    /// Whether another season (not `exclude_id`) already uses this name,
    /// ignoring case.
    async fn exists_by_name_ignore_case(&self, name: &str, exclude_id: Option<i64>)
        -> AppResult<bool>;

    /// Whether another season's inclusive date range intersects `start..=end`.
    async fn overlaps(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        exclude_id: Option<i64>,
    ) -> AppResult<bool>;

    async fn create(&self, season: NewSeason) -> AppResult<Season>;

    async fn update(&self, id: i64, season: NewSeason) -> AppResult<Season>;

    async fn delete(&self, id: i64) -> AppResult<()>;
}

pub struct SeasonStore {
    db: DatabaseConnection,
}

impl SeasonStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

pub(crate) fn season_not_found(id: i64) -> String {
    format!("Season not found: {}", id)
}

#[async_trait]
impl SeasonRepository for SeasonStore {
    async fn list(&self) -> AppResult<Vec<Season>> {
        let models = SeasonEntity::find()
            .order_by_asc(season::Column::StartDate)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Season::from).collect())
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Season>> {
        let result = SeasonEntity::find_by_id(id).one(&self.db).await?;
        Ok(result.map(Season::from))
    }

    async fn exists_by_name_ignore_case(
        &self,
        name: &str,
        exclude_id: Option<i64>,
    ) -> AppResult<bool> {
        let mut query = SeasonEntity::find().filter(
            Expr::expr(Func::lower(Expr::col(season::Column::Name))).eq(name.to_lowercase()),
        );
        if let Some(id) = exclude_id {
            query = query.filter(season::Column::Id.ne(id));
        }

        Ok(query.count(&self.db).await? > 0)
    }

    async fn overlaps(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        exclude_id: Option<i64>,
    ) -> AppResult<bool> {
        let mut query = SeasonEntity::find()
            .filter(season::Column::StartDate.lte(end))
            .filter(season::Column::EndDate.gte(start));
        if let Some(id) = exclude_id {
            query = query.filter(season::Column::Id.ne(id));
        }

        Ok(query.count(&self.db).await? > 0)
    }

    async fn create(&self, season: NewSeason) -> AppResult<Season> {
        let active_model = ActiveModel {
            name: Set(season.name),
            start_date: Set(season.start_date),
            end_date: Set(season.end_date),
            ..Default::default()
        };

        let model = active_model.insert(&self.db).await?;
        Ok(Season::from(model))
    }

    async fn update(&self, id: i64, season: NewSeason) -> AppResult<Season> {
        let existing = SeasonEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_not_found(|| season_not_found(id))?;

        let mut active: ActiveModel = existing.into();
        active.name = Set(season.name);
        active.start_date = Set(season.start_date);
        active.end_date = Set(season.end_date);

        let model = active.update(&self.db).await?;
        Ok(Season::from(model))
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        let result = SeasonEntity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(AppError::not_found(season_not_found(id)));
        }
        Ok(())
    }
}
