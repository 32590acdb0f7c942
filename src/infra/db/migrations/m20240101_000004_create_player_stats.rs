//! Migration: Create player_stats table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PlayerStats::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PlayerStats::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(PlayerStats::MatchId).big_integer().not_null())
                    .col(ColumnDef::new(PlayerStats::PlayerId).big_integer().not_null())
                    .col(counter(PlayerStats::Minutes))
                    .col(counter(PlayerStats::Points))
                    .col(counter(PlayerStats::Rebounds))
                    .col(counter(PlayerStats::Assists))
                    .col(counter(PlayerStats::Steals))
                    .col(counter(PlayerStats::Blocks))
                    .col(counter(PlayerStats::Turnovers))
                    .col(counter(PlayerStats::Fouls))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_player_stats_match")
                            .from(PlayerStats::Table, PlayerStats::MatchId)
                            .to(Matches::Table, Matches::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_player_stats_player")
                            .from(PlayerStats::Table, PlayerStats::PlayerId)
                            .to(Players::Table, Players::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_player_stats_match_player")
                    .table(PlayerStats::Table)
                    .col(PlayerStats::MatchId)
                    .col(PlayerStats::PlayerId)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PlayerStats::Table).to_owned())
            .await
    }
}

/// Non-negative integer counter defaulting to zero.
fn counter(column: PlayerStats) -> ColumnDef {
    ColumnDef::new(column)
        .integer()
        .not_null()
        .default(0)
        .check(Expr::col(column).gte(0))
        .to_owned()
}

#[derive(Iden, Clone, Copy)]
enum PlayerStats {
    Table,
    Id,
    MatchId,
    PlayerId,
    Minutes,
    Points,
    Rebounds,
    Assists,
    Steals,
    Blocks,
    Turnovers,
    Fouls,
}

#[derive(Iden)]
enum Matches {
    Table,
    Id,
}

#[derive(Iden)]
enum Players {
    Table,
    Id,
}
