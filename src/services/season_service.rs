//! Season management.
//!
//! Seasons may not share a name (ignoring case) and their inclusive date
//! ranges may not overlap.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{NewSeason, Season};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::repositories::season_not_found;
use crate::infra::UnitOfWork;

#[async_trait]
pub trait SeasonService: Send + Sync {
    async fn list_seasons(&self) -> AppResult<Vec<Season>>;

    async fn get_season(&self, id: i64) -> AppResult<Season>;

    async fn create_season(&self, season: NewSeason) -> AppResult<Season>;

    async fn update_season(&self, id: i64, season: NewSeason) -> AppResult<Season>;

    async fn delete_season(&self, id: i64) -> AppResult<()>;
}

pub struct SeasonManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> SeasonManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    async fn check_rules(&self, season: &NewSeason, exclude_id: Option<i64>) -> AppResult<()> {
        season.validate_dates()?;

        let seasons = self.uow.seasons();
        if seasons
            .exists_by_name_ignore_case(&season.name, exclude_id)
            .await?
        {
            return Err(AppError::conflict(format!(
                "Season already exists: {}",
                season.name
            )));
        }
        if seasons
            .overlaps(season.start_date, season.end_date, exclude_id)
            .await?
        {
            return Err(AppError::conflict(
                "Season dates overlap with an existing season.",
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl<U: UnitOfWork> SeasonService for SeasonManager<U> {
    async fn list_seasons(&self) -> AppResult<Vec<Season>> {
        self.uow.seasons().list().await
    }

    async fn get_season(&self, id: i64) -> AppResult<Season> {
        self.uow
            .seasons()
            .find_by_id(id)
            .await?
            .ok_or_not_found(|| season_not_found(id))
    }

    async fn create_season(&self, season: NewSeason) -> AppResult<Season> {
        self.check_rules(&season, None).await?;

        let created = self.uow.seasons().create(season).await?;
        tracing::info!(season_id = created.id, name = %created.name, "Season created");
        Ok(created)
    }

    async fn update_season(&self, id: i64, season: NewSeason) -> AppResult<Season> {
        self.get_season(id).await?;
        self.check_rules(&season, Some(id)).await?;

        self.uow.seasons().update(id, season).await
    }

    async fn delete_season(&self, id: i64) -> AppResult<()> {
        self.uow.seasons().delete(id).await?;
        tracing::info!(season_id = id, "Season deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testing::MockRepos;
    use chrono::NaiveDate;
    use mockall::predicate::eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn new_season(name: &str) -> NewSeason {
        NewSeason {
            name: name.to_string(),
            start_date: date(2024, 10, 1),
            end_date: date(2025, 6, 30),
        }
    }

    fn stored(id: i64, season: &NewSeason) -> Season {
        Season {
            id,
            name: season.name.clone(),
            start_date: season.start_date,
            end_date: season.end_date,
        }
    }

    #[tokio::test]
    async fn test_create_season() {
        let mut repos = MockRepos::default();
        repos
            .seasons
            .expect_exists_by_name_ignore_case()
            .withf(|name, exclude| name == "2024/25" && exclude.is_none())
            .returning(|_, _| Ok(false));
        repos
            .seasons
            .expect_overlaps()
            .returning(|_, _, _| Ok(false));
        repos
            .seasons
            .expect_create()
            .returning(|s| Ok(stored(1, &s)));

        let service = SeasonManager::new(repos.into_uow());
        let season = tokio_test::assert_ok!(service.create_season(new_season("2024/25")).await);

        assert_eq!(season.id, 1);
    }

    #[tokio::test]
    async fn test_create_rejects_reversed_dates() {
        let mut repos = MockRepos::default();
        repos.seasons.expect_create().never();

        let mut season = new_season("2024/25");
        season.end_date = date(2024, 9, 1);

        let service = SeasonManager::new(repos.into_uow());
        let err = service.create_season(season).await.unwrap_err();

        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_name() {
        let mut repos = MockRepos::default();
        repos
            .seasons
            .expect_exists_by_name_ignore_case()
            .returning(|_, _| Ok(true));
        repos.seasons.expect_create().never();

        let service = SeasonManager::new(repos.into_uow());
        let err = service
            .create_season(new_season("2024/25"))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Conflict(ref m) if m == "Season already exists: 2024/25"));
    }

    #[tokio::test]
    async fn test_create_rejects_overlap() {
        let mut repos = MockRepos::default();
        repos
            .seasons
            .expect_exists_by_name_ignore_case()
            .returning(|_, _| Ok(false));
        repos
            .seasons
            .expect_overlaps()
            .returning(|_, _, _| Ok(true));

        let service = SeasonManager::new(repos.into_uow());
        let err = service
            .create_season(new_season("2024/25"))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Conflict(ref m) if m.contains("overlap")));
    }

    #[tokio::test]
    async fn test_update_excludes_itself_from_checks() {
        let mut repos = MockRepos::default();
        repos
            .seasons
            .expect_find_by_id()
            .with(eq(4))
            .returning(|id| Ok(Some(stored(id, &new_season("2024/25")))));
        repos
            .seasons
            .expect_exists_by_name_ignore_case()
            .withf(|_, exclude| *exclude == Some(4))
            .returning(|_, _| Ok(false));
        repos
            .seasons
            .expect_overlaps()
            .withf(|_, _, exclude| *exclude == Some(4))
            .returning(|_, _, _| Ok(false));
        repos
            .seasons
            .expect_update()
            .returning(|id, s| Ok(stored(id, &s)));

        let service = SeasonManager::new(repos.into_uow());
        let season = service
            .update_season(4, new_season("2024/25 Regular"))
            .await
            .unwrap();

        assert_eq!(season.name, "2024/25 Regular");
    }

    #[tokio::test]
    async fn test_get_missing_season() {
        let mut repos = MockRepos::default();
        repos
            .seasons
            .expect_find_by_id()
            .returning(|_| Ok(None));

        let service = SeasonManager::new(repos.into_uow());
        let err = service.get_season(12).await.unwrap_err();

        assert!(matches!(err, AppError::NotFound(ref m) if m == "Season not found: 12"));
    }
}
