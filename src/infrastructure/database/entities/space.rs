//! Space (listing) entity
//!
//! List-valued attributes are stored as JSON arrays in text columns.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "spaces")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub host_id: String,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub image_src: String,
    #[sea_orm(column_type = "Text")]
    pub images: String,
    pub category: String,

    #[sea_orm(nullable)]
    pub room_count: Option<i32>,
    pub bathroom_count: i32,
    pub capacity: i32,
    #[sea_orm(nullable)]
    pub square_footage: Option<i32>,

    pub location_value: String,
    #[sea_orm(nullable)]
    pub address: Option<String>,
    #[sea_orm(nullable)]
    pub floor: Option<String>,
    #[sea_orm(nullable)]
    pub access_instructions: Option<String>,

    pub hourly_rate: i64,
    pub minimum_hours: i32,
    pub cleaning_fee: i64,

    #[sea_orm(column_type = "Text")]
    pub amenities: String,
    #[sea_orm(column_type = "Text")]
    pub lighting: String,
    #[sea_orm(column_type = "Text")]
    pub equipment: String,
    #[sea_orm(column_type = "Text")]
    pub furniture: String,

    pub instant_book: bool,
    pub same_day_booking: bool,
    pub turnaround_time: i32,
    #[sea_orm(column_type = "Text")]
    pub rules: String,
    #[sea_orm(column_type = "Text")]
    pub allowed_activities: String,

    #[sea_orm(nullable)]
    pub parking: Option<String>,
    pub accessibility: bool,
    pub wifi_available: bool,
    pub kitchen_available: bool,
    pub outdoor_space: bool,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::reservation::Entity")]
    Reservations,
    #[sea_orm(has_many = "super::availability::Entity")]
    Availability,
}

impl Related<super::reservation::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reservations.def()
    }
}

impl Related<super::availability::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Availability.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
