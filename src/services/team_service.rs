//! Team management.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{NewTeam, Team};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::repositories::team_not_found;
use crate::infra::UnitOfWork;

#[async_trait]
pub trait TeamService: Send + Sync {
    async fn list_teams(&self) -> AppResult<Vec<Team>>;

    async fn get_team(&self, id: i64) -> AppResult<Team>;

    async fn create_team(&self, team: NewTeam) -> AppResult<Team>;

    async fn update_team(&self, id: i64, team: NewTeam) -> AppResult<Team>;

    async fn delete_team(&self, id: i64) -> AppResult<()>;
}

pub struct TeamManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> TeamManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    async fn ensure_unique_name(&self, name: &str, exclude_id: Option<i64>) -> AppResult<()> {
        if self
            .uow
            .teams()
            .exists_by_name_ignore_case(name, exclude_id)
            .await?
        {
            return Err(AppError::conflict(format!("Team already exists: {}", name)));
        }
        Ok(())
    }
}

#[async_trait]
impl<U: UnitOfWork> TeamService for TeamManager<U> {
    async fn list_teams(&self) -> AppResult<Vec<Team>> {
        self.uow.teams().list().await
    }

    async fn get_team(&self, id: i64) -> AppResult<Team> {
        self.uow
            .teams()
            .find_by_id(id)
            .await?
            .ok_or_not_found(|| team_not_found(id))
    }

    async fn create_team(&self, team: NewTeam) -> AppResult<Team> {
        self.ensure_unique_name(&team.name, None).await?;

        let created = self.uow.teams().create(team).await?;
        tracing::info!(team_id = created.id, name = %created.name, "Team created");
        Ok(created)
    }

    async fn update_team(&self, id: i64, team: NewTeam) -> AppResult<Team> {
        self.get_team(id).await?;
        self.ensure_unique_name(&team.name, Some(id)).await?;

        self.uow.teams().update(id, team).await
    }

    async fn delete_team(&self, id: i64) -> AppResult<()> {
        self.uow.teams().delete(id).await?;
        tracing::info!(team_id = id, "Team deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::testing::MockRepos;

    #[tokio::test]
    async fn test_create_rejects_duplicate_name_any_case() {
        let mut repos = MockRepos::default();
        repos
            .teams
            .expect_exists_by_name_ignore_case()
            .withf(|name, exclude| name == "LAKERS" && exclude.is_none())
            .returning(|_, _| Ok(true));
        repos.teams.expect_create().never();

        let service = TeamManager::new(repos.into_uow());
        let err = service
            .create_team(NewTeam {
                name: "LAKERS".to_string(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Conflict(ref m) if m == "Team already exists: LAKERS"));
    }

    #[tokio::test]
    async fn test_rename_to_own_name_allowed() {
        let mut repos = MockRepos::default();
        repos.teams.expect_find_by_id().returning(|id| {
            Ok(Some(Team {
                id,
                name: "Lakers".to_string(),
            }))
        });
        repos
            .teams
            .expect_exists_by_name_ignore_case()
            .withf(|_, exclude| *exclude == Some(2))
            .returning(|_, _| Ok(false));
        repos
            .teams
            .expect_update()
            .returning(|id, t| Ok(Team { id, name: t.name }));

        let service = TeamManager::new(repos.into_uow());
        let team = service
            .update_team(
                2,
                NewTeam {
                    name: "lakers".to_string(),
                },
            )
            .await
            .unwrap();

        assert_eq!(team.name, "lakers");
    }

    #[tokio::test]
    async fn test_update_missing_team() {
        let mut repos = MockRepos::default();
        repos.teams.expect_find_by_id().returning(|_| Ok(None));
        repos.teams.expect_update().never();

        let service = TeamManager::new(repos.into_uow());
        let err = service
            .update_team(
                8,
                NewTeam {
                    name: "Bulls".to_string(),
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::NotFound(ref m) if m == "Team not found: 8"));
    }
}
