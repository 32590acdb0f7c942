//! Match management.
//!
//! Every write drops the cached standings of the affected season(s).

use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::Arc;

use crate::domain::{Match, NewMatch};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::repositories::{match_not_found, season_not_found, team_not_found};
use crate::infra::{StandingsCache, UnitOfWork};

/// Optional filters for listing matches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchFilter {
    pub date: Option<NaiveDate>,
    pub season_id: Option<i64>,
}

#[async_trait]
pub trait MatchService: Send + Sync {
    async fn list_matches(&self, filter: MatchFilter) -> AppResult<Vec<Match>>;

    async fn get_match(&self, id: i64) -> AppResult<Match>;

    async fn create_match(&self, new_match: NewMatch) -> AppResult<Match>;

    async fn update_match(&self, id: i64, new_match: NewMatch) -> AppResult<Match>;

    async fn delete_match(&self, id: i64) -> AppResult<()>;
}

pub struct MatchManager<U: UnitOfWork> {
    uow: Arc<U>,
    standings_cache: Arc<dyn StandingsCache>,
}

impl<U: UnitOfWork> MatchManager<U> {
    pub fn new(uow: Arc<U>, standings_cache: Arc<dyn StandingsCache>) -> Self {
        Self {
            uow,
            standings_cache,
        }
    }

    /// Resolve the season and both teams, then apply the match rules.
    async fn check_match(&self, new_match: &NewMatch) -> AppResult<()> {
        let season = self
            .uow
            .seasons()
            .find_by_id(new_match.season_id)
            .await?
            .ok_or_not_found(|| season_not_found(new_match.season_id))?;

        for team_id in [new_match.home_team_id, new_match.away_team_id] {
            if self.uow.teams().find_by_id(team_id).await?.is_none() {
                return Err(AppError::not_found(team_not_found(team_id)));
            }
        }

        new_match.validate_against(&season)
    }

    /// Cache failures are logged, never returned.
    async fn invalidate(&self, season_id: i64) {
        if let Err(e) = self.standings_cache.invalidate_standings(season_id).await {
            tracing::warn!(season_id, error = %e, "Failed to invalidate standings cache");
        }
    }
}

#[async_trait]
impl<U: UnitOfWork> MatchService for MatchManager<U> {
    async fn list_matches(&self, filter: MatchFilter) -> AppResult<Vec<Match>> {
        let matches = self.uow.matches();
        match (filter.season_id, filter.date) {
            (Some(season_id), date) => {
                let mut found = matches.list_by_season(season_id).await?;
                if let Some(date) = date {
                    found.retain(|m| m.date == date);
                }
                Ok(found)
            }
            (None, Some(date)) => matches.list_by_date(date).await,
            (None, None) => matches.list().await,
        }
    }

    async fn get_match(&self, id: i64) -> AppResult<Match> {
        self.uow
            .matches()
            .find_by_id(id)
            .await?
            .ok_or_not_found(|| match_not_found(id))
    }

    async fn create_match(&self, new_match: NewMatch) -> AppResult<Match> {
        self.check_match(&new_match).await?;

        let created = self.uow.matches().create(new_match).await?;
        self.invalidate(created.season_id).await;

        tracing::info!(
            match_id = created.id,
            season_id = created.season_id,
            home = created.home_team_id,
            away = created.away_team_id,
            "Match created"
        );
        Ok(created)
    }

    async fn update_match(&self, id: i64, new_match: NewMatch) -> AppResult<Match> {
        let existing = self.get_match(id).await?;
        self.check_match(&new_match).await?;

        let updated = self.uow.matches().update(id, new_match).await?;
        self.invalidate(updated.season_id).await;
        if existing.season_id != updated.season_id {
            self.invalidate(existing.season_id).await;
        }
        Ok(updated)
    }

    async fn delete_match(&self, id: i64) -> AppResult<()> {
        let existing = self.get_match(id).await?;

        self.uow.matches().delete(id).await?;
        self.invalidate(existing.season_id).await;

        tracing::info!(match_id = id, "Match deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Season, Team};
    use crate::infra::MockStandingsCache;
    use crate::services::testing::MockRepos;
    use mockall::predicate::eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn season(id: i64) -> Season {
        Season {
            id,
            name: "2024/25".to_string(),
            start_date: date(2024, 10, 1),
            end_date: date(2025, 6, 30),
        }
    }

    fn new_match(home: i64, away: i64, on: NaiveDate) -> NewMatch {
        NewMatch {
            season_id: 1,
            date: on,
            home_team_id: home,
            away_team_id: away,
            home_team_score: None,
            away_team_score: None,
        }
    }

    fn stored(id: i64, m: &NewMatch) -> Match {
        Match {
            id,
            season_id: m.season_id,
            date: m.date,
            home_team_id: m.home_team_id,
            away_team_id: m.away_team_id,
            home_team_score: m.home_score(),
            away_team_score: m.away_score(),
        }
    }

    fn with_known_relations(repos: &mut MockRepos) {
        repos
            .seasons
            .expect_find_by_id()
            .returning(|id| Ok(Some(season(id))));
        repos.teams.expect_find_by_id().returning(|id| {
            Ok(Some(Team {
                id,
                name: format!("Team {}", id),
            }))
        });
    }

    #[tokio::test]
    async fn test_create_defaults_scores_and_invalidates_standings() {
        let mut repos = MockRepos::default();
        with_known_relations(&mut repos);
        repos
            .matches
            .expect_create()
            .returning(|m| Ok(stored(10, &m)));

        let mut cache = MockStandingsCache::new();
        cache
            .expect_invalidate_standings()
            .with(eq(1))
            .times(1)
            .returning(|_| Ok(()));

        let service = MatchManager::new(repos.into_uow(), Arc::new(cache));
        let created = service
            .create_match(new_match(1, 2, date(2024, 11, 2)))
            .await
            .unwrap();

        assert_eq!((created.home_team_score, created.away_team_score), (0, 0));
    }

    #[tokio::test]
    async fn test_create_rejects_same_teams() {
        let mut repos = MockRepos::default();
        with_known_relations(&mut repos);
        repos.matches.expect_create().never();

        let service = MatchManager::new(repos.into_uow(), Arc::new(MockStandingsCache::new()));
        let err = service
            .create_match(new_match(3, 3, date(2024, 11, 2)))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Validation(ref m) if m == "Home and away teams must be different."));
    }

    #[tokio::test]
    async fn test_create_rejects_date_outside_season() {
        let mut repos = MockRepos::default();
        with_known_relations(&mut repos);
        repos.matches.expect_create().never();

        let service = MatchManager::new(repos.into_uow(), Arc::new(MockStandingsCache::new()));
        let err = service
            .create_match(new_match(1, 2, date(2025, 7, 1)))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Validation(ref m) if m == "Match date must be within the season dates."));
    }

    #[tokio::test]
    async fn test_create_with_unknown_season() {
        let mut repos = MockRepos::default();
        repos.seasons.expect_find_by_id().returning(|_| Ok(None));

        let service = MatchManager::new(repos.into_uow(), Arc::new(MockStandingsCache::new()));
        let err = service
            .create_match(new_match(1, 2, date(2024, 11, 2)))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::NotFound(ref m) if m == "Season not found: 1"));
    }

    #[tokio::test]
    async fn test_create_with_unknown_team() {
        let mut repos = MockRepos::default();
        repos
            .seasons
            .expect_find_by_id()
            .returning(|id| Ok(Some(season(id))));
        repos.teams.expect_find_by_id().returning(|id| {
            Ok((id == 1).then(|| Team {
                id,
                name: "Bulls".to_string(),
            }))
        });

        let service = MatchManager::new(repos.into_uow(), Arc::new(MockStandingsCache::new()));
        let err = service
            .create_match(new_match(1, 2, date(2024, 11, 2)))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::NotFound(ref m) if m == "Team not found: 2"));
    }

    #[tokio::test]
    async fn test_cache_failure_does_not_fail_write() {
        let mut repos = MockRepos::default();
        with_known_relations(&mut repos);
        repos
            .matches
            .expect_create()
            .returning(|m| Ok(stored(10, &m)));

        let mut cache = MockStandingsCache::new();
        cache
            .expect_invalidate_standings()
            .returning(|_| Err(AppError::internal("Cache error: connection refused")));

        let service = MatchManager::new(repos.into_uow(), Arc::new(cache));
        assert!(service
            .create_match(new_match(1, 2, date(2024, 11, 2)))
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn test_list_by_season_and_date() {
        let mut repos = MockRepos::default();
        repos
            .matches
            .expect_list_by_season()
            .with(eq(1))
            .returning(|_| {
                Ok(vec![
                    stored(1, &new_match(1, 2, date(2024, 11, 2))),
                    stored(2, &new_match(3, 4, date(2024, 11, 3))),
                ])
            });
        repos.matches.expect_list_by_date().never();

        let service = MatchManager::new(repos.into_uow(), Arc::new(MockStandingsCache::new()));
        let found = service
            .list_matches(MatchFilter {
                date: Some(date(2024, 11, 3)),
                season_id: Some(1),
            })
            .await
            .unwrap();

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, 2);
    }
}
