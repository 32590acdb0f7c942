//! Migration: Create players and matches tables.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Players::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Players::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Players::TeamId).big_integer().null())
                    .col(ColumnDef::new(Players::FirstName).string_len(100).not_null())
                    .col(ColumnDef::new(Players::LastName).string_len(100).not_null())
                    .col(ColumnDef::new(Players::Position).string_len(20).null())
                    .col(ColumnDef::new(Players::Age).integer().null())
                    .col(ColumnDef::new(Players::Height).integer().null())
                    .col(ColumnDef::new(Players::Weight).integer().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_players_team")
                            .from(Players::Table, Players::TeamId)
                            .to(Teams::Table, Teams::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_players_team_id")
                    .table(Players::Table)
                    .col(Players::TeamId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Matches::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Matches::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Matches::SeasonId).big_integer().not_null())
                    .col(ColumnDef::new(Matches::Date).date().not_null())
                    .col(ColumnDef::new(Matches::HomeTeamId).big_integer().not_null())
                    .col(ColumnDef::new(Matches::AwayTeamId).big_integer().not_null())
                    .col(
                        ColumnDef::new(Matches::HomeTeamScore)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Matches::AwayTeamScore)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .check(Expr::col(Matches::HomeTeamId).ne(Expr::col(Matches::AwayTeamId)))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_matches_season")
                            .from(Matches::Table, Matches::SeasonId)
                            .to(Seasons::Table, Seasons::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_matches_home_team")
                            .from(Matches::Table, Matches::HomeTeamId)
                            .to(Teams::Table, Teams::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_matches_away_team")
                            .from(Matches::Table, Matches::AwayTeamId)
                            .to(Teams::Table, Teams::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_matches_season_id")
                    .table(Matches::Table)
                    .col(Matches::SeasonId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_matches_date")
                    .table(Matches::Table)
                    .col(Matches::Date)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Matches::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Players::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Players {
    Table,
    Id,
    TeamId,
    FirstName,
    LastName,
    Position,
    Age,
    Height,
    Weight,
}

#[derive(Iden)]
enum Matches {
    Table,
    Id,
    SeasonId,
    Date,
    HomeTeamId,
    AwayTeamId,
    HomeTeamScore,
    AwayTeamScore,
}

#[derive(Iden)]
enum Seasons {
    Table,
    Id,
}

#[derive(Iden)]
enum Teams {
    Table,
    Id,
}
