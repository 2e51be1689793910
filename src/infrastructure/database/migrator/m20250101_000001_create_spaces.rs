//! Create spaces table
//!
//! One row per listing. List-valued attributes are JSON text.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Spaces::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Spaces::Id).string().not_null().primary_key())
                    .col(ColumnDef::new(Spaces::HostId).string().not_null())
                    .col(ColumnDef::new(Spaces::Title).string().not_null())
                    .col(ColumnDef::new(Spaces::Description).text().not_null())
                    .col(ColumnDef::new(Spaces::ImageSrc).string().not_null())
                    .col(ColumnDef::new(Spaces::Images).text().not_null().default("[]"))
                    .col(ColumnDef::new(Spaces::Category).string().not_null())
                    .col(ColumnDef::new(Spaces::RoomCount).integer())
                    .col(ColumnDef::new(Spaces::BathroomCount).integer().not_null().default(1))
                    .col(ColumnDef::new(Spaces::Capacity).integer().not_null())
                    .col(ColumnDef::new(Spaces::SquareFootage).integer())
                    .col(ColumnDef::new(Spaces::LocationValue).string().not_null())
                    .col(ColumnDef::new(Spaces::Address).string())
                    .col(ColumnDef::new(Spaces::Floor).string())
                    .col(ColumnDef::new(Spaces::AccessInstructions).text())
                    .col(ColumnDef::new(Spaces::HourlyRate).big_integer().not_null())
                    .col(ColumnDef::new(Spaces::MinimumHours).integer().not_null().default(2))
                    .col(ColumnDef::new(Spaces::CleaningFee).big_integer().not_null().default(0))
                    .col(ColumnDef::new(Spaces::Amenities).text().not_null().default("[]"))
                    .col(ColumnDef::new(Spaces::Lighting).text().not_null().default("[]"))
                    .col(ColumnDef::new(Spaces::Equipment).text().not_null().default("[]"))
                    .col(ColumnDef::new(Spaces::Furniture).text().not_null().default("[]"))
                    .col(ColumnDef::new(Spaces::InstantBook).boolean().not_null().default(false))
                    .col(ColumnDef::new(Spaces::SameDayBooking).boolean().not_null().default(true))
                    .col(ColumnDef::new(Spaces::TurnaroundTime).integer().not_null().default(2))
                    .col(ColumnDef::new(Spaces::Rules).text().not_null().default("[]"))
                    .col(ColumnDef::new(Spaces::AllowedActivities).text().not_null().default("[]"))
                    .col(ColumnDef::new(Spaces::Parking).string())
                    .col(ColumnDef::new(Spaces::Accessibility).boolean().not_null().default(false))
                    .col(ColumnDef::new(Spaces::WifiAvailable).boolean().not_null().default(true))
                    .col(ColumnDef::new(Spaces::KitchenAvailable).boolean().not_null().default(false))
                    .col(ColumnDef::new(Spaces::OutdoorSpace).boolean().not_null().default(false))
                    .col(
                        ColumnDef::new(Spaces::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Spaces::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_spaces_host")
                    .table(Spaces::Table)
                    .col(Spaces::HostId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_spaces_location")
                    .table(Spaces::Table)
                    .col(Spaces::LocationValue)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Spaces::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Spaces {
    Table,
    Id,
    HostId,
    Title,
    Description,
    ImageSrc,
    Images,
    Category,
    RoomCount,
    BathroomCount,
    Capacity,
    SquareFootage,
    LocationValue,
    Address,
    Floor,
    AccessInstructions,
    HourlyRate,
    MinimumHours,
    CleaningFee,
    Amenities,
    Lighting,
    Equipment,
    Furniture,
    InstantBook,
    SameDayBooking,
    TurnaroundTime,
    Rules,
    AllowedActivities,
    Parking,
    Accessibility,
    WifiAvailable,
    KitchenAvailable,
    OutdoorSpace,
    CreatedAt,
    UpdatedAt,
}
