//! Player statistics database entity.

use sea_orm::entity::prelude::*;
use sea_orm::Set;

use crate::domain::{PlayerStats, StatLine};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "player_stats")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub match_id: i64,
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

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::matches::Entity",
        from = "Column::MatchId",
        to = "super::matches::Column::Id",
        on_delete = "Cascade"
    )]
    Match,
    #[sea_orm(
        belongs_to = "super::player::Entity",
        from = "Column::PlayerId",
        to = "super::player::Column::Id",
        on_delete = "Cascade"
    )]
    Player,
}

impl ActiveModelBehavior for ActiveModel {}

impl ActiveModel {
    /// Overwrite every counter with the values from `line`.
    pub fn apply_line(&mut self, line: &StatLine) {
        self.player_id = Set(line.player_id);
        self.minutes = Set(line.minutes);
        self.points = Set(line.points);
        self.rebounds = Set(line.rebounds);
        self.assists = Set(line.assists);
        self.steals = Set(line.steals);
        self.blocks = Set(line.blocks);
        self.turnovers = Set(line.turnovers);
        self.fouls = Set(line.fouls);
    }
}

impl From<Model> for PlayerStats {
    fn from(model: Model) -> Self {
        PlayerStats {
            id: model.id,
            match_id: model.match_id,
            line: StatLine {
                player_id: model.player_id,
                minutes: model.minutes,
                points: model.points,
                rebounds: model.rebounds,
                assists: model.assists,
                steals: model.steals,
                blocks: model.blocks,
                turnovers: model.turnovers,
                fouls: model.fouls,
            },
        }
    }
}
