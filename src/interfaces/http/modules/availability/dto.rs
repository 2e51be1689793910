//! Availability DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::application::NewAvailability;
use crate::domain::{AvailabilityPatch, AvailabilityRule};
use crate::shared::validate_hhmm;

#[derive(Debug, Serialize, ToSchema)]
pub struct AvailabilityDto {
    pub id: String,
    pub space_id: String,
    /// 0 = Sunday … 6 = Saturday
    pub day_of_week: i32,
    pub start_time: String,
    pub end_time: String,
    pub block_date: Option<DateTime<Utc>>,
    pub is_blocked: bool,
    pub created_at: DateTime<Utc>,
}

impl From<AvailabilityRule> for AvailabilityDto {
    fn from(r: AvailabilityRule) -> Self {
        Self {
            id: r.id,
            space_id: r.space_id,
            day_of_week: r.day_of_week,
            start_time: r.start_time,
            end_time: r.end_time,
            block_date: r.block_date,
            is_blocked: r.is_blocked,
            created_at: r.created_at,
        }
    }
}

/// New schedule entry. Omitted fields default to Sunday 09:00-22:00, not blocked.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateAvailabilityRequest {
    #[validate(length(min = 1))]
    pub space_id: String,
    #[validate(range(min = 0, max = 6))]
    pub day_of_week: Option<i32>,
    /// `HH:MM`
    #[validate(custom(function = "validate_hhmm"))]
    pub start_time: Option<String>,
    /// `HH:MM`
    #[validate(custom(function = "validate_hhmm"))]
    pub end_time: Option<String>,
    pub block_date: Option<DateTime<Utc>>,
    pub is_blocked: Option<bool>,
}

impl From<CreateAvailabilityRequest> for NewAvailability {
    fn from(r: CreateAvailabilityRequest) -> Self {
        Self {
            space_id: r.space_id,
            day_of_week: r.day_of_week,
            start_time: r.start_time,
            end_time: r.end_time,
            block_date: r.block_date,
            is_blocked: r.is_blocked,
        }
    }
}

/// Distinguishes an absent field (`None`) from an explicit `null` (`Some(None)`).
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Partial update; only the given fields change. `"block_date": null`
/// clears the blocked date.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateAvailabilityRequest {
    #[validate(range(min = 0, max = 6))]
    pub day_of_week: Option<i32>,
    #[validate(custom(function = "validate_hhmm"))]
    pub start_time: Option<String>,
    #[validate(custom(function = "validate_hhmm"))]
    pub end_time: Option<String>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<DateTime<Utc>>)]
    pub block_date: Option<Option<DateTime<Utc>>>,
    pub is_blocked: Option<bool>,
}

impl From<UpdateAvailabilityRequest> for AvailabilityPatch {
    fn from(r: UpdateAvailabilityRequest) -> Self {
        Self {
            day_of_week: r.day_of_week,
            start_time: r.start_time,
            end_time: r.end_time,
            block_date: r.block_date,
            is_blocked: r.is_blocked,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_block_date_clears_and_absent_keeps() {
        let clear: UpdateAvailabilityRequest =
            serde_json::from_str(r#"{"block_date": null}"#).unwrap();
        assert_eq!(clear.block_date, Some(None));

        let keep: UpdateAvailabilityRequest = serde_json::from_str(r#"{"is_blocked": true}"#).unwrap();
        assert_eq!(keep.block_date, None);
    }

    #[test]
    fn bad_clock_value_fails_validation() {
        let req: UpdateAvailabilityRequest =
            serde_json::from_str(r#"{"start_time": "9am"}"#).unwrap();
        assert!(req.validate().is_err());
    }
}
