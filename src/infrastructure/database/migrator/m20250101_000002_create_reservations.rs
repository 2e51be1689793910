//! Create reservations table
//!
//! Hourly bookings of a space. `[start_time, end_time)` is half-open.
//! The composite index serves the per-space overlap lookup.

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
                    .table(Reservations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Reservations::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Reservations::SpaceId).string().not_null())
                    .col(ColumnDef::new(Reservations::UserId).string().not_null())
                    .col(
                        ColumnDef::new(Reservations::StartTime)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Reservations::EndTime)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Reservations::DurationHours).big_integer().not_null())
                    .col(ColumnDef::new(Reservations::HourlyRate).big_integer().not_null())
                    .col(
                        ColumnDef::new(Reservations::CleaningFee)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Reservations::ServiceFee)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Reservations::TotalPrice).big_integer().not_null())
                    .col(ColumnDef::new(Reservations::EventType).string().not_null())
                    .col(ColumnDef::new(Reservations::GuestCount).integer().not_null())
                    .col(ColumnDef::new(Reservations::EventDetails).text())
                    .col(
                        ColumnDef::new(Reservations::Status)
                            .string_len(20)
                            .not_null()
                            .default("pending"),
                    )
                    .col(
                        ColumnDef::new(Reservations::InstantBooked)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Reservations::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Reservations::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reservations_space")
                            .from(Reservations::Table, Reservations::SpaceId)
                            .to(Spaces::Table, Spaces::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_reservations_space_window")
                    .table(Reservations::Table)
                    .col(Reservations::SpaceId)
                    .col(Reservations::StartTime)
                    .col(Reservations::EndTime)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_reservations_user")
                    .table(Reservations::Table)
                    .col(Reservations::UserId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_reservations_status")
                    .table(Reservations::Table)
                    .col(Reservations::Status)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Reservations::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Reservations {
    Table,
    Id,
    SpaceId,
    UserId,
    StartTime,
    EndTime,
    DurationHours,
    HourlyRate,
    CleaningFee,
    ServiceFee,
    TotalPrice,
    EventType,
    GuestCount,
    EventDetails,
    Status,
    InstantBooked,
    CreatedAt,
    UpdatedAt,
}
