//! Reservation DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::application::NewReservation;
use crate::domain::{EventType, Reservation};

/// Request to book a space by the hour
///
/// The price is computed server-side from the space's rates.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateReservationRequest {
    #[validate(length(min = 1))]
    pub space_id: String,
    /// Inclusive start (RFC 3339)
    pub start_time: DateTime<Utc>,
    /// Exclusive end (RFC 3339); must be after `start_time`
    pub end_time: DateTime<Utc>,
    /// `photoshoot`, `meeting`, `party`, `workshop`, `popup`,
    /// `film_production` or `other`
    #[serde(default)]
    pub event_type: Option<String>,
    #[validate(range(min = 1))]
    pub guest_count: i32,
    #[validate(length(max = 2000))]
    pub event_details: Option<String>,
    /// Ask for immediate confirmation
    #[serde(default)]
    pub instant_book: bool,
}

impl From<CreateReservationRequest> for NewReservation {
    fn from(r: CreateReservationRequest) -> Self {
        Self {
            space_id: r.space_id,
            start_time: r.start_time,
            end_time: r.end_time,
            event_type: r
                .event_type
                .as_deref()
                .map(EventType::from_str)
                .unwrap_or(EventType::Other),
            guest_count: r.guest_count,
            event_details: r.event_details,
            instant_book: r.instant_book,
        }
    }
}

/// Reservation details in API responses
#[derive(Debug, Serialize, ToSchema)]
pub struct ReservationDto {
    pub id: String,
    pub space_id: String,
    pub user_id: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub duration_hours: i64,
    pub hourly_rate: i64,
    pub cleaning_fee: i64,
    pub service_fee: i64,
    pub total_price: i64,
    pub event_type: String,
    pub guest_count: i32,
    pub event_details: Option<String>,
    /// `pending`, `confirmed`, `completed` or `cancelled`
    pub status: String,
    pub instant_booked: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Reservation> for ReservationDto {
    fn from(r: Reservation) -> Self {
        Self {
            start_time: r.slot.start(),
            end_time: r.slot.end(),
            id: r.id,
            space_id: r.space_id,
            user_id: r.user_id,
            duration_hours: r.duration_hours,
            hourly_rate: r.hourly_rate,
            cleaning_fee: r.cleaning_fee,
            service_fee: r.service_fee,
            total_price: r.total_price,
            event_type: r.event_type.as_str().to_string(),
            guest_count: r.guest_count,
            event_details: r.event_details,
            status: r.status.as_str().to_string(),
            instant_booked: r.instant_booked,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

/// Reservation list filters
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListReservationsParams {
    pub space_id: Option<String>,
    /// Guest who booked; must be the caller
    pub user_id: Option<String>,
    /// Host of the booked spaces; must be the caller
    pub host_id: Option<String>,
    pub status: Option<String>,
    /// Page number (1-based)
    pub page: Option<u64>,
    /// Page size (1-100, default 20)
    pub limit: Option<u64>,
}
