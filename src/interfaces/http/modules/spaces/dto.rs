//! Space DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::application::NewSpace;
use crate::domain::{Space, SpaceCategory, SpaceFeatures};

/// Listing as returned by the API
#[derive(Debug, Serialize, ToSchema)]
pub struct SpaceDto {
    pub id: String,
    pub host_id: String,
    pub title: String,
    pub description: String,
    pub image_src: String,
    pub images: Vec<String>,
    /// `photoshoot`, `meeting`, `party`, `workshop`, `popup`, `film_production`
    pub category: String,
    pub room_count: Option<i32>,
    pub bathroom_count: i32,
    pub capacity: i32,
    pub square_footage: Option<i32>,
    pub location_value: String,
    pub address: Option<String>,
    pub floor: Option<String>,
    pub access_instructions: Option<String>,
    pub hourly_rate: i64,
    pub minimum_hours: i32,
    pub cleaning_fee: i64,
    pub amenities: Vec<String>,
    pub lighting: Vec<String>,
    pub equipment: Vec<String>,
    pub furniture: Vec<String>,
    pub instant_book: bool,
    pub same_day_booking: bool,
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

impl From<Space> for SpaceDto {
    fn from(s: Space) -> Self {
        Self {
            id: s.id,
            host_id: s.host_id,
            title: s.title,
            description: s.description,
            image_src: s.image_src,
            images: s.images,
            category: s.category.as_str().to_string(),
            room_count: s.room_count,
            bathroom_count: s.bathroom_count,
            capacity: s.capacity,
            square_footage: s.square_footage,
            location_value: s.location_value,
            address: s.address,
            floor: s.floor,
            access_instructions: s.access_instructions,
            hourly_rate: s.hourly_rate,
            minimum_hours: s.minimum_hours,
            cleaning_fee: s.cleaning_fee,
            amenities: s.features.amenities,
            lighting: s.features.lighting,
            equipment: s.features.equipment,
            furniture: s.features.furniture,
            instant_book: s.instant_book,
            same_day_booking: s.same_day_booking,
            turnaround_time: s.turnaround_time,
            rules: s.rules,
            allowed_activities: s.allowed_activities,
            parking: s.parking,
            accessibility: s.accessibility,
            wifi_available: s.wifi_available,
            kitchen_available: s.kitchen_available,
            outdoor_space: s.outdoor_space,
            created_at: s.created_at,
            updated_at: s.updated_at,
        }
    }
}

fn validate_category(value: &str) -> Result<(), validator::ValidationError> {
    match SpaceCategory::parse(value) {
        Some(_) => Ok(()),
        None => Err(validator::ValidationError::new("unknown_category")),
    }
}

/// Request to list a new space. The caller becomes its host.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateSpaceRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(min = 1))]
    pub description: String,
    #[validate(length(min = 1))]
    pub image_src: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[validate(custom(function = "validate_category"))]
    pub category: String,
    #[validate(range(min = 0))]
    pub room_count: Option<i32>,
    #[validate(range(min = 0))]
    pub bathroom_count: Option<i32>,
    #[validate(range(min = 1))]
    pub capacity: i32,
    #[validate(range(min = 0))]
    pub square_footage: Option<i32>,
    #[validate(length(min = 1))]
    pub location_value: String,
    pub address: Option<String>,
    pub floor: Option<String>,
    pub access_instructions: Option<String>,
    #[validate(range(min = 1))]
    pub hourly_rate: i64,
    #[validate(range(min = 1))]
    pub minimum_hours: Option<i32>,
    #[validate(range(min = 0))]
    pub cleaning_fee: Option<i64>,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(default)]
    pub lighting: Vec<String>,
    #[serde(default)]
    pub equipment: Vec<String>,
    #[serde(default)]
    pub furniture: Vec<String>,
    pub instant_book: Option<bool>,
    pub same_day_booking: Option<bool>,
    #[validate(range(min = 0))]
    pub turnaround_time: Option<i32>,
    #[serde(default)]
    pub rules: Vec<String>,
    #[serde(default)]
    pub allowed_activities: Vec<String>,
    pub parking: Option<String>,
    pub accessibility: Option<bool>,
    pub wifi_available: Option<bool>,
    pub kitchen_available: Option<bool>,
    pub outdoor_space: Option<bool>,
}

impl From<CreateSpaceRequest> for NewSpace {
    fn from(r: CreateSpaceRequest) -> Self {
        Self {
            title: r.title,
            description: r.description,
            image_src: r.image_src,
            images: r.images,
            category: SpaceCategory::parse(&r.category),
            room_count: r.room_count,
            bathroom_count: r.bathroom_count,
            capacity: r.capacity,
            square_footage: r.square_footage,
            location_value: r.location_value,
            address: r.address,
            floor: r.floor,
            access_instructions: r.access_instructions,
            hourly_rate: r.hourly_rate,
            minimum_hours: r.minimum_hours,
            cleaning_fee: r.cleaning_fee,
            features: SpaceFeatures {
                amenities: r.amenities,
                lighting: r.lighting,
                equipment: r.equipment,
                furniture: r.furniture,
            },
            instant_book: r.instant_book,
            same_day_booking: r.same_day_booking,
            turnaround_time: r.turnaround_time,
            rules: r.rules,
            allowed_activities: r.allowed_activities,
            parking: r.parking,
            accessibility: r.accessibility,
            wifi_available: r.wifi_available,
            kitchen_available: r.kitchen_available,
            outdoor_space: r.outdoor_space,
        }
    }
}

/// Search filters. List filters are comma-separated and match when the
/// space has at least one of the given values.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchSpacesParams {
    pub host_id: Option<String>,
    pub category: Option<String>,
    /// Minimum number of rooms
    pub room_count: Option<i32>,
    /// Expected guests; space capacity must be at least this
    pub guest_count: Option<i32>,
    /// Same as `guest_count`; ignored when `guest_count` is given
    pub capacity: Option<i32>,
    /// Minimum number of bathrooms
    pub bathroom_count: Option<i32>,
    pub location_value: Option<String>,
    pub amenities: Option<String>,
    pub lighting: Option<String>,
    pub equipment: Option<String>,
    pub furniture: Option<String>,
    pub instant_book: Option<bool>,
    pub same_day_booking: Option<bool>,
    pub min_hourly_rate: Option<i64>,
    pub max_hourly_rate: Option<i64>,
    pub parking: Option<String>,
    pub accessibility: Option<bool>,
    pub wifi_available: Option<bool>,
    pub kitchen_available: Option<bool>,
    pub outdoor_space: Option<bool>,
    /// Start of the window the space must be free for (RFC 3339)
    pub start_time: Option<DateTime<Utc>>,
    /// End of that window, exclusive (RFC 3339)
    pub end_time: Option<DateTime<Utc>>,
    /// Page number (1-based)
    pub page: Option<u64>,
    /// Page size (1-100, default 20)
    pub limit: Option<u64>,
}

/// Split a comma-separated query value, dropping blanks.
pub fn split_list(raw: &Option<String>) -> Vec<String> {
    raw.as_deref()
        .map(|v| {
            v.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_list_trims_and_skips_blanks() {
        assert_eq!(
            split_list(&Some("wifi, projector,,".into())),
            vec!["wifi".to_string(), "projector".to_string()]
        );
        assert!(split_list(&None).is_empty());
    }

    #[test]
    fn unknown_category_fails_validation() {
        let body = serde_json::json!({
            "title": "Hall",
            "description": "Big",
            "image_src": "x.jpg",
            "category": "wedding",
            "capacity": 10,
            "location_value": "NYC",
            "hourly_rate": 50
        });
        let req: CreateSpaceRequest = serde_json::from_value(body).unwrap();
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("category"));
    }
}
