//! Space (listing) domain entity

use chrono::{DateTime, Utc};

use crate::domain::reservation::TimeSlot;

/// Kind of event a space is listed for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpaceCategory {
    Photoshoot,
    Meeting,
    Party,
    Workshop,
    Popup,
    FilmProduction,
}

impl SpaceCategory {
    pub const ALL: [SpaceCategory; 6] = [
        Self::Photoshoot,
        Self::Meeting,
        Self::Party,
        Self::Workshop,
        Self::Popup,
        Self::FilmProduction,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Photoshoot => "photoshoot",
            Self::Meeting => "meeting",
            Self::Party => "party",
            Self::Workshop => "workshop",
            Self::Popup => "popup",
            Self::FilmProduction => "film_production",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
    }
}

impl std::fmt::Display for SpaceCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Feature lists a host can tag a space with
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpaceFeatures {
    pub amenities: Vec<String>,
    pub lighting: Vec<String>,
    pub equipment: Vec<String>,
    pub furniture: Vec<String>,
}

/// An event space listed by a host
#[derive(Debug, Clone)]
pub struct Space {
    pub id: String,
    /// Owner of the listing
    pub host_id: String,
    pub title: String,
    pub description: String,
    pub image_src: String,
    pub images: Vec<String>,
    pub category: SpaceCategory,
    pub room_count: Option<i32>,
    pub bathroom_count: i32,
    /// Maximum number of guests
    pub capacity: i32,
    pub square_footage: Option<i32>,
    pub location_value: String,
    pub address: Option<String>,
    pub floor: Option<String>,
    pub access_instructions: Option<String>,
    pub hourly_rate: i64,
    pub minimum_hours: i32,
    pub cleaning_fee: i64,
    pub features: SpaceFeatures,
    pub instant_book: bool,
    pub same_day_booking: bool,
    /// Hours needed between bookings
    pub turnaround_time: i32,
    pub rules: Vec<String>,
    pub allowed_activities: Vec<String>,
    pub parking: Option<String>,
    pub accessibility: bool,
    pub wifi_available: bool,
    pub kitchen_available: bool,
    pub outdoor_space: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Space {
    pub fn is_hosted_by(&self, user_id: &str) -> bool {
        self.host_id == user_id
    }
}

/// Search criteria for listings. `None` / empty fields do not constrain.
#[derive(Debug, Clone, Default)]
pub struct SpaceFilter {
    pub host_id: Option<String>,
    pub category: Option<SpaceCategory>,
    pub min_room_count: Option<i32>,
    /// Space capacity must be at least this many guests
    pub min_capacity: Option<i32>,
    pub min_bathroom_count: Option<i32>,
    pub location_value: Option<String>,
    pub features: SpaceFeatures,
    pub instant_book: Option<bool>,
    pub same_day_booking: Option<bool>,
    pub min_hourly_rate: Option<i64>,
    pub max_hourly_rate: Option<i64>,
    pub parking: Option<String>,
    pub accessibility: Option<bool>,
    pub wifi_available: Option<bool>,
    pub kitchen_available: Option<bool>,
    pub outdoor_space: Option<bool>,
    /// Only spaces with no active reservation overlapping this window
    pub available_during: Option<TimeSlot>,
}

impl SpaceFilter {
    /// The list-valued criteria: every non-empty wanted list must share at
    /// least one value with the space's list.
    pub fn matches_features(&self, space: &Space) -> bool {
        has_some(&space.features.amenities, &self.features.amenities)
            && has_some(&space.features.lighting, &self.features.lighting)
            && has_some(&space.features.equipment, &self.features.equipment)
            && has_some(&space.features.furniture, &self.features.furniture)
    }
}

fn has_some(have: &[String], wanted: &[String]) -> bool {
    wanted.is_empty() || wanted.iter().any(|w| have.contains(w))
}
