//! Migration: Create seasons and teams tables.
//!
//! Name uniqueness is case-insensitive, enforced with unique indexes on
//! `lower(name)`.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Seasons::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Seasons::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Seasons::Name).string_len(100).not_null())
                    .col(ColumnDef::new(Seasons::StartDate).date().not_null())
                    .col(ColumnDef::new(Seasons::EndDate).date().not_null())
                    .check(Expr::col(Seasons::EndDate).gte(Expr::col(Seasons::StartDate)))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Teams::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Teams::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Teams::Name).string_len(100).not_null())
                    .to_owned(),
            )
            .await?;

        let db = manager.get_connection();
        db.execute_unprepared(
            "CREATE UNIQUE INDEX IF NOT EXISTS idx_seasons_name_lower ON seasons (lower(name))",
        )
        .await?;
        db.execute_unprepared(
            "CREATE UNIQUE INDEX IF NOT EXISTS idx_teams_name_lower ON teams (lower(name))",
        )
        .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Teams::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Seasons::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Seasons {
    Table,
    Id,
    Name,
    StartDate,
    EndDate,
}

#[derive(Iden)]
enum Teams {
    Table,
    Id,
    Name,
}
