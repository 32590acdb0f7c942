//! Player entity.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::errors::{AppError, AppResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub id: i64,
    /// `None` for free agents.
    pub team_id: Option<i64>,
    pub first_name: String,
    pub last_name: String,
    pub position: Option<String>,
    pub age: Option<i32>,
    /// Centimetres.
    pub height: Option<i32>,
    /// Kilograms.
    pub weight: Option<i32>,
}

/// Data for creating or replacing a player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPlayer {
    pub team_id: Option<i64>,
    pub first_name: String,
    pub last_name: String,
    pub position: Option<String>,
    pub age: Option<i32>,
    pub height: Option<i32>,
    pub weight: Option<i32>,
}

impl NewPlayer {
    /// Physical measurements must be positive when present.
    pub fn validate(&self) -> AppResult<()> {
        let measurements = [
            ("age", self.age),
            ("height", self.height),
            ("weight", self.weight),
        ];
        for (field, value) in measurements {
            if matches!(value, Some(v) if v <= 0) {
                return Err(AppError::validation(format!("{}: must be positive", field)));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlayerResponse {
    #[schema(example = 23)]
    pub id: i64,
    #[schema(example = 1)]
    pub team_id: Option<i64>,
    #[schema(example = "Michael")]
    pub first_name: String,
    #[schema(example = "Jordan")]
    pub last_name: String,
    #[schema(example = "SG")]
    pub position: Option<String>,
    #[schema(example = 27)]
    pub age: Option<i32>,
    #[schema(example = 198)]
    pub height: Option<i32>,
    #[schema(example = 98)]
    pub weight: Option<i32>,
}

impl From<Player> for PlayerResponse {
    fn from(player: Player) -> Self {
        Self {
            id: player.id,
            team_id: player.team_id,
            first_name: player.first_name,
            last_name: player.last_name,
            position: player.position,
            age: player.age,
            height: player.height,
            weight: player.weight,
        }
    }
}
