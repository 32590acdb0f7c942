//! Per-match player statistics, including CSV bulk import and export.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{PlayerStats, StatLine};
use crate::errors::{AppError, AppResult};
use crate::infra::repositories::{match_not_found, player_not_found};
use crate::infra::UnitOfWork;
use crate::services::container::parallel;
use crate::utils::csv::{read_stat_lines, write_stat_lines};
use crate::with_transaction;

#[async_trait]
pub trait StatsService: Send + Sync {
    async fn list_stats(&self, match_id: i64) -> AppResult<Vec<PlayerStats>>;

    /// Record a new stat line; a second line for the same player conflicts.
    async fn record_stats(&self, match_id: i64, line: StatLine) -> AppResult<PlayerStats>;

    async fn delete_stats(&self, match_id: i64, player_id: i64) -> AppResult<()>;

    /// Upsert every row of a CSV file in one transaction and return the
    /// number of rows written. Nothing is written if any row is invalid.
    async fn import_csv(&self, match_id: i64, data: &[u8]) -> AppResult<usize>;

    async fn export_csv(&self, match_id: i64) -> AppResult<String>;
}

pub struct StatsManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> StatsManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    async fn ensure_match(&self, match_id: i64) -> AppResult<()> {
        match self.uow.matches().find_by_id(match_id).await? {
            Some(_) => Ok(()),
            None => Err(AppError::not_found(match_not_found(match_id))),
        }
    }
}

#[async_trait]
impl<U: UnitOfWork> StatsService for StatsManager<U> {
    async fn list_stats(&self, match_id: i64) -> AppResult<Vec<PlayerStats>> {
        self.ensure_match(match_id).await?;
        self.uow.stats().list_by_match(match_id).await
    }

    async fn record_stats(&self, match_id: i64, line: StatLine) -> AppResult<PlayerStats> {
        line.validate()?;
        self.ensure_match(match_id).await?;

        if self.uow.players().find_by_id(line.player_id).await?.is_none() {
            return Err(AppError::not_found(player_not_found(line.player_id)));
        }
        if self
            .uow
            .stats()
            .find(match_id, line.player_id)
            .await?
            .is_some()
        {
            return Err(AppError::conflict(format!(
                "Stats for player {} in match {} already exist",
                line.player_id, match_id
            )));
        }

        self.uow.stats().create(match_id, line).await
    }

    async fn delete_stats(&self, match_id: i64, player_id: i64) -> AppResult<()> {
        self.uow.stats().delete(match_id, player_id).await
    }

    async fn import_csv(&self, match_id: i64, data: &[u8]) -> AppResult<usize> {
        self.ensure_match(match_id).await?;
        let rows = read_stat_lines(data)?;

        let players = self.uow.players();
        let lookups: Vec<_> = rows
            .iter()
            .map(|row| {
                let players = players.clone();
                let player_id = row.stats.player_id;
                async move { players.find_by_id(player_id).await }
            })
            .collect();
        let found = parallel::join_all(lookups).await?;

        if let Some((row, _)) = rows.iter().zip(&found).find(|(_, p)| p.is_none()) {
            return Err(AppError::csv(format!(
                "line {}: unknown player_id {}",
                row.line, row.stats.player_id
            )));
        }

        let lines: Vec<StatLine> = rows.into_iter().map(|row| row.stats).collect();
        let imported = with_transaction!(self.uow, |ctx| {
            let stats = ctx.stats();
            for line in &lines {
                stats.upsert(match_id, line).await?;
            }
            Ok::<usize, AppError>(lines.len())
        })?;

        tracing::info!(match_id, imported, "Imported stat lines from CSV");
        Ok(imported)
    }

    async fn export_csv(&self, match_id: i64) -> AppResult<String> {
        let stats = self.list_stats(match_id).await?;
        let lines: Vec<StatLine> = stats.into_iter().map(|s| s.line).collect();
        write_stat_lines(&lines)
    }
}
