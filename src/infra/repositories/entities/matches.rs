//! Match database entity.

use sea_orm::entity::prelude::*;

use crate::domain::Match;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "matches")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub season_id: i64,
    pub date: Date,
    pub home_team_id: i64,
    pub away_team_id: i64,
    pub home_team_score: i32,
    pub away_team_score: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::season::Entity",
        from = "Column::SeasonId",
        to = "super::season::Column::Id",
        on_delete = "Restrict"
    )]
    Season,
}

impl Related<super::season::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Season.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Match {
    fn from(model: Model) -> Self {
        Match {
            id: model.id,
            season_id: model.season_id,
            date: model.date,
            home_team_id: model.home_team_id,
            away_team_id: model.away_team_id,
            home_team_score: model.home_team_score,
            away_team_score: model.away_team_score,
        }
    }
}
