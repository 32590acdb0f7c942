//! Per-match player statistics ("stat lines").

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::errors::{AppError, AppResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerStats {
    pub id: i64,
    pub match_id: i64,
    pub line: StatLine,
}

/// Box-score numbers for one player in one match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatLine {
    pub player_id: i64,
    pub minutes: i32,
    pub points: i32,
    pub rebounds: i32,
    pub assists: i32,
    pub steals: i32,
    pub blocks: i32,
    pub turnovers: i32,
    pub fouls: i32,
}

impl StatLine {
    /// All counters must be non-negative.
    pub fn validate(&self) -> AppResult<()> {
        let counters = [
            ("minutes", self.minutes),
            ("points", self.points),
            ("rebounds", self.rebounds),
            ("assists", self.assists),
            ("steals", self.steals),
            ("blocks", self.blocks),
            ("turnovers", self.turnovers),
            ("fouls", self.fouls),
        ];

        match counters.iter().find(|(_, value)| *value < 0) {
            Some((field, _)) => Err(AppError::validation(format!(
                "{}: must not be negative",
                field
            ))),
            None => Ok(()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStatsResponse {
    #[schema(example = 100)]
    pub id: i64,
    #[schema(example = 10)]
    pub match_id: i64,
    #[schema(example = 23)]
    pub player_id: i64,
    #[schema(example = 38)]
    pub minutes: i32,
    #[schema(example = 31)]
    pub points: i32,
    #[schema(example = 7)]
    pub rebounds: i32,
    #[schema(example = 6)]
    pub assists: i32,
    pub steals: i32,
    pub blocks: i32,
    pub turnovers: i32,
    pub fouls: i32,
}

impl From<PlayerStats> for PlayerStatsResponse {
    fn from(stats: PlayerStats) -> Self {
        let line = stats.line;
        Self {
            id: stats.id,
            match_id: stats.match_id,
            player_id: line.player_id,
            minutes: line.minutes,
            points: line.points,
            rebounds: line.rebounds,
            assists: line.assists,
            steals: line.steals,
            blocks: line.blocks,
            turnovers: line.turnovers,
            fouls: line.fouls,
        }
    }
}
