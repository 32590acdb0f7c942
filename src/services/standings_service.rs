//! Season standings with a read-through cache.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{compute_standings, Standing};
use crate::errors::{AppError, AppResult};
use crate::infra::repositories::season_not_found;
use crate::infra::{StandingsCache, UnitOfWork};
use crate::services::container::parallel;

#[async_trait]
pub trait StandingsService: Send + Sync {
    async fn standings(&self, season_id: i64) -> AppResult<Vec<Standing>>;
}

pub struct StandingsCalculator<U: UnitOfWork> {
    uow: Arc<U>,
    cache: Arc<dyn StandingsCache>,
}

impl<U: UnitOfWork> StandingsCalculator<U> {
    pub fn new(uow: Arc<U>, cache: Arc<dyn StandingsCache>) -> Self {
        Self { uow, cache }
    }
}

#[async_trait]
impl<U: UnitOfWork> StandingsService for StandingsCalculator<U> {
    async fn standings(&self, season_id: i64) -> AppResult<Vec<Standing>> {
        if self.uow.seasons().find_by_id(season_id).await?.is_none() {
            return Err(AppError::not_found(season_not_found(season_id)));
        }

        match self.cache.get_standings(season_id).await {
            Ok(Some(cached)) => return Ok(cached),
            Ok(None) => {}
            Err(e) => tracing::warn!(season_id, error = %e, "Standings cache read failed"),
        }

        let (teams, matches) = parallel::join2(
            self.uow.teams().list(),
            self.uow.matches().list_by_season(season_id),
        )
        .await?;
        let table = compute_standings(&teams, &matches);

        if let Err(e) = self.cache.set_standings(season_id, table.clone()).await {
            tracing::warn!(season_id, error = %e, "Standings cache write failed");
        }
        Ok(table)
    }
}
