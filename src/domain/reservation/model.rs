//! Reservation domain entity

use chrono::{DateTime, Duration, Utc};

use crate::domain::DomainResult;
use crate::shared::errors::DomainError;

/// Reservation status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReservationStatus {
    /// Requested by the guest, awaiting payment capture or host confirmation
    Pending,
    /// Paid or instantly booked
    Confirmed,
    /// The booked interval has elapsed
    Completed,
    /// Cancelled by the guest or the host
    Cancelled,
}

impl ReservationStatus {
    /// Statuses that hold the slot and therefore block overlapping bookings.
    pub const ACTIVE: [ReservationStatus; 2] = [Self::Pending, Self::Confirmed];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pending" => Some(Self::Pending),
            "confirmed" => Some(Self::Confirmed),
            "completed" => Some(Self::Completed),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, Self::Pending | Self::Confirmed)
    }

    /// `pending → confirmed → completed`, and `pending|confirmed → cancelled`.
    pub fn can_transition_to(&self, next: ReservationStatus) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Confirmed)
                | (Self::Pending, Self::Cancelled)
                | (Self::Confirmed, Self::Cancelled)
                | (Self::Confirmed, Self::Completed)
        )
    }
}

impl std::fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// What the space is booked for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventType {
    Photoshoot,
    Meeting,
    Party,
    Workshop,
    Popup,
    FilmProduction,
    Other,
}

impl EventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Photoshoot => "photoshoot",
            Self::Meeting => "meeting",
            Self::Party => "party",
            Self::Workshop => "workshop",
            Self::Popup => "popup",
            Self::FilmProduction => "film_production",
            Self::Other => "other",
        }
    }

    /// Unknown values map to `Other`.
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "photoshoot" => Self::Photoshoot,
            "meeting" => Self::Meeting,
            "party" => Self::Party,
            "workshop" => Self::Workshop,
            "popup" => Self::Popup,
            "film_production" => Self::FilmProduction,
            _ => Self::Other,
        }
    }
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Half-open booking window `[start, end)`.
///
/// Construction guarantees `start < end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeSlot {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl TimeSlot {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> DomainResult<Self> {
        if start >= end {
            return Err(DomainError::InvalidInterval {
                start: start.to_rfc3339(),
                end: end.to_rfc3339(),
            });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Booked duration rounded up to whole hours.
    pub fn billable_hours(&self) -> i64 {
        let seconds = self.duration().num_seconds();
        (seconds + 3599) / 3600
    }

    /// Half-open overlap: touching endpoints do not overlap.
    pub fn overlaps(&self, other: &TimeSlot) -> bool {
        self.start < other.end && self.end > other.start
    }
}

/// An hourly booking of a space
#[derive(Debug, Clone)]
pub struct Reservation {
    pub id: String,
    pub space_id: String,
    /// Guest who made the booking
    pub user_id: String,
    pub slot: TimeSlot,
    pub duration_hours: i64,
    pub hourly_rate: i64,
    pub cleaning_fee: i64,
    pub service_fee: i64,
    pub total_price: i64,
    pub event_type: EventType,
    pub guest_count: i32,
    pub event_details: Option<String>,
    pub status: ReservationStatus,
    pub instant_booked: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Reservation {
    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }

    /// Whether the booked interval is over at `now`.
    pub fn has_elapsed(&self, now: DateTime<Utc>) -> bool {
        self.slot.end() <= now
    }

    pub fn confirm(&mut self) -> DomainResult<()> {
        self.transition(ReservationStatus::Confirmed)
    }

    pub fn cancel(&mut self) -> DomainResult<()> {
        self.transition(ReservationStatus::Cancelled)
    }

    pub fn complete(&mut self) -> DomainResult<()> {
        self.transition(ReservationStatus::Completed)
    }

    fn transition(&mut self, next: ReservationStatus) -> DomainResult<()> {
        if !self.status.can_transition_to(next) {
            return Err(DomainError::Validation(format!(
                "reservation {} cannot move from {} to {}",
                self.id, self.status, next
            )));
        }
        self.status = next;
        self.updated_at = Utc::now();
        Ok(())
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 6, 1, hour, minute, 0).unwrap()
    }

    fn sample_reservation(status: ReservationStatus) -> Reservation {
        Reservation {
            id: "R1".into(),
            space_id: "S1".into(),
            user_id: "guest-1".into(),
            slot: TimeSlot::new(at(10, 0), at(12, 0)).unwrap(),
            duration_hours: 2,
            hourly_rate: 50,
            cleaning_fee: 0,
            service_fee: 10,
            total_price: 110,
            event_type: EventType::Meeting,
            guest_count: 5,
            event_details: None,
            status,
            instant_booked: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn slot_rejects_empty_and_inverted_windows() {
        assert!(matches!(
            TimeSlot::new(at(10, 0), at(10, 0)),
            Err(DomainError::InvalidInterval { .. })
        ));
        assert!(matches!(
            TimeSlot::new(at(12, 0), at(10, 0)),
            Err(DomainError::InvalidInterval { .. })
        ));
    }

    #[test]
    fn billable_hours_round_up() {
        assert_eq!(TimeSlot::new(at(10, 0), at(12, 0)).unwrap().billable_hours(), 2);
        assert_eq!(TimeSlot::new(at(10, 0), at(12, 1)).unwrap().billable_hours(), 3);
        assert_eq!(TimeSlot::new(at(10, 0), at(10, 30)).unwrap().billable_hours(), 1);
    }

    #[test]
    fn only_pending_and_confirmed_are_active() {
        assert!(ReservationStatus::Pending.is_active());
        assert!(ReservationStatus::Confirmed.is_active());
        assert!(!ReservationStatus::Completed.is_active());
        assert!(!ReservationStatus::Cancelled.is_active());
    }

    #[test]
    fn confirm_then_complete() {
        let mut r = sample_reservation(ReservationStatus::Pending);
        r.confirm().unwrap();
        assert_eq!(r.status, ReservationStatus::Confirmed);
        r.complete().unwrap();
        assert_eq!(r.status, ReservationStatus::Completed);
        assert!(!r.is_active());
    }

    #[test]
    fn cancel_from_pending_or_confirmed() {
        let mut r = sample_reservation(ReservationStatus::Pending);
        r.cancel().unwrap();
        assert_eq!(r.status, ReservationStatus::Cancelled);

        let mut r = sample_reservation(ReservationStatus::Confirmed);
        r.cancel().unwrap();
        assert_eq!(r.status, ReservationStatus::Cancelled);
    }

    #[test]
    fn terminal_statuses_reject_transitions() {
        let mut r = sample_reservation(ReservationStatus::Cancelled);
        assert!(matches!(r.confirm(), Err(DomainError::Validation(_))));
        let mut r = sample_reservation(ReservationStatus::Completed);
        assert!(matches!(r.cancel(), Err(DomainError::Validation(_))));
    }

    #[test]
    fn pending_cannot_complete() {
        let mut r = sample_reservation(ReservationStatus::Pending);
        assert!(r.complete().is_err());
        assert_eq!(r.status, ReservationStatus::Pending);
    }

    #[test]
    fn status_parse_is_case_insensitive() {
        assert_eq!(ReservationStatus::parse("Confirmed"), Some(ReservationStatus::Confirmed));
        assert_eq!(ReservationStatus::parse("bogus"), None);
    }

    #[test]
    fn unknown_event_type_is_other() {
        assert_eq!(EventType::from_str("film_production"), EventType::FilmProduction);
        assert_eq!(EventType::from_str("wedding"), EventType::Other);
    }

    #[test]
    fn elapsed_at_end_instant() {
        let r = sample_reservation(ReservationStatus::Confirmed);
        assert!(!r.has_elapsed(at(11, 59)));
        assert!(r.has_elapsed(at(12, 0)));
    }
}
