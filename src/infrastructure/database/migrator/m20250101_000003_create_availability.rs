//! Create availability table
//!
//! Weekly opening windows and blocked dates per space.

use sea_orm_migration::prelude::*;

use super::m20250101_000001_create_spaces::Spaces;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Availability::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Availability::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Availability::SpaceId).string().not_null())
                    .col(
                        ColumnDef::new(Availability::DayOfWeek)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Availability::StartTime)
                            .string_len(5)
                            .not_null()
                            .default("09:00"),
                    )
                    .col(
                        ColumnDef::new(Availability::EndTime)
                            .string_len(5)
                            .not_null()
                            .default("22:00"),
                    )
                    .col(ColumnDef::new(Availability::BlockDate).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(Availability::IsBlocked)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Availability::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_availability_space")
                            .from(Availability::Table, Availability::SpaceId)
                            .to(Spaces::Table, Spaces::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_availability_space")
                    .table(Availability::Table)
                    .col(Availability::SpaceId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Availability::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Availability {
    Table,
    Id,
    SpaceId,
    DayOfWeek,
    StartTime,
    EndTime,
    BlockDate,
    IsBlocked,
    CreatedAt,
}
