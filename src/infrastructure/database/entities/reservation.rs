//! Reservation entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Reservation status as stored
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum ReservationStatus {
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "confirmed")]
    Confirmed,
    #[sea_orm(string_value = "completed")]
    Completed,
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "reservations")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub space_id: String,
    /// Guest who booked
    pub user_id: String,

    /// Inclusive start of the booked window
    pub start_time: DateTimeUtc,
    /// Exclusive end of the booked window
    pub end_time: DateTimeUtc,

    pub duration_hours: i64,
    pub hourly_rate: i64,
    pub cleaning_fee: i64,
    pub service_fee: i64,
    pub total_price: i64,

    pub event_type: String,
    pub guest_count: i32,
    #[sea_orm(nullable, column_type = "Text")]
    pub event_details: Option<String>,

    pub status: ReservationStatus,
    pub instant_booked: bool,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::space::Entity",
        from = "Column::SpaceId",
        to = "super::space::Column::Id"
    )]
    Space,
}

impl Related<super::space::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Space.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
