//! Booking service: reservation creation and lifecycle

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::domain::{
    DomainError, DomainResult, EventType, PricingBreakdown, RepositoryProvider, Reservation,
    ReservationFilter, ReservationStatus, Space, TimeSlot,
};
use crate::shared::{PaginatedResult, PaginationParams};

/// Booking request as submitted by a guest
#[derive(Debug, Clone)]
pub struct NewReservation {
    pub space_id: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub event_type: EventType,
    pub guest_count: i32,
    pub event_details: Option<String>,
    /// Guest asks for immediate confirmation
    pub instant_book: bool,
}

/// Creates reservations and drives their status transitions.
///
/// Writes touching one space (create, confirm, cancel) are serialised by an
/// in-process lock; the repository additionally runs the conflict check and
/// the insert in a single transaction, and status writes only apply when the
/// stored status is still the one that was read.
pub struct BookingService {
    repos: Arc<dyn RepositoryProvider>,
    service_fee_percent: u32,
    /// One entry per space that has seen a booking write. Entries are kept
    /// for the life of the process, so the map is bounded by the number of
    /// listed spaces.
    space_locks: DashMap<String, Arc<Mutex<()>>>,
}

impl BookingService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, service_fee_percent: u32) -> Self {
        Self {
            repos,
            service_fee_percent,
            space_locks: DashMap::new(),
        }
    }

    fn space_lock(&self, space_id: &str) -> Arc<Mutex<()>> {
        self.space_locks
            .entry(space_id.to_string())
            .or_default()
            .clone()
    }

    async fn load_space(&self, space_id: &str) -> DomainResult<Space> {
        self.repos
            .spaces()
            .find_by_id(space_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Space", space_id))
    }

    async fn load_reservation(&self, id: &str) -> DomainResult<Reservation> {
        self.repos
            .reservations()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Reservation", id))
    }

    pub async fn create_reservation(
        &self,
        user_id: &str,
        request: NewReservation,
    ) -> DomainResult<Reservation> {
        let slot = TimeSlot::new(request.start_time, request.end_time)?;

        if request.guest_count < 1 {
            return Err(DomainError::Validation(
                "guest_count must be at least 1".to_string(),
            ));
        }

        let space = self.load_space(&request.space_id).await?;

        if slot.duration() < Duration::hours(i64::from(space.minimum_hours)) {
            return Err(DomainError::Validation(format!(
                "space {} requires at least {} hours, requested {} minutes",
                space.id,
                space.minimum_hours,
                slot.duration().num_minutes()
            )));
        }

        let hours = slot.billable_hours();
        let price = PricingBreakdown::compute(
            space.hourly_rate,
            hours,
            space.cleaning_fee,
            self.service_fee_percent,
        )?;
        let instant = space.instant_book || request.instant_book;
        let now = Utc::now();

        let reservation = Reservation {
            id: Uuid::new_v4().to_string(),
            space_id: space.id.clone(),
            user_id: user_id.to_string(),
            slot,
            duration_hours: hours,
            hourly_rate: price.hourly_rate,
            cleaning_fee: price.cleaning_fee,
            service_fee: price.service_fee,
            total_price: price.total,
            event_type: request.event_type,
            guest_count: request.guest_count,
            event_details: request.event_details,
            status: if instant {
                ReservationStatus::Confirmed
            } else {
                ReservationStatus::Pending
            },
            instant_booked: instant,
            created_at: now,
            updated_at: now,
        };

        let lock = self.space_lock(&space.id);
        let _guard = lock.lock().await;

        match self.repos.reservations().create_if_available(reservation).await {
            Ok(created) => {
                metrics::counter!("reservations_created_total", "status" => created.status.as_str())
                    .increment(1);
                info!(
                    reservation_id = %created.id,
                    space_id = %created.space_id,
                    user_id = %created.user_id,
                    start = %created.slot.start(),
                    end = %created.slot.end(),
                    status = %created.status,
                    total_price = created.total_price,
                    "Reservation created"
                );
                Ok(created)
            }
            Err(e @ DomainError::SlotUnavailable { .. }) => {
                metrics::counter!("reservation_conflicts_total").increment(1);
                warn!(
                    space_id = %space.id,
                    start = %request.start_time,
                    end = %request.end_time,
                    "Booking rejected: time slot already booked"
                );
                Err(e)
            }
            Err(e) => Err(e),
        }
    }

    /// Visible to the guest who booked and to the host of the space.
    pub async fn get_reservation(&self, id: &str, caller: &str) -> DomainResult<Reservation> {
        let reservation = self.load_reservation(id).await?;
        if reservation.user_id != caller {
            let space = self.load_space(&reservation.space_id).await?;
            if !space.is_hosted_by(caller) {
                return Err(DomainError::Forbidden(
                    "not a party to this reservation".to_string(),
                ));
            }
        }
        Ok(reservation)
    }

    /// Callers see their own bookings and the bookings on spaces they host.
    ///
    /// `user_id` / `host_id` must name the caller. A bare `space_id` needs
    /// the caller to host that space; with no scope at all the caller's own
    /// bookings are listed.
    pub async fn list_reservations(
        &self,
        caller: &str,
        mut filter: ReservationFilter,
        page: PaginationParams,
    ) -> DomainResult<PaginatedResult<Reservation>> {
        let foreign = |id: &Option<String>| id.as_deref().is_some_and(|id| id != caller);
        if foreign(&filter.user_id) || foreign(&filter.host_id) {
            return Err(DomainError::Forbidden(
                "cannot list another user's reservations".to_string(),
            ));
        }

        if filter.user_id.is_none() && filter.host_id.is_none() {
            match &filter.space_id {
                Some(space_id) => {
                    let space = self.load_space(space_id).await?;
                    if !space.is_hosted_by(caller) {
                        filter.user_id = Some(caller.to_string());
                    }
                }
                None => filter.user_id = Some(caller.to_string()),
            }
        }

        self.repos.reservations().list(&filter, page).await
    }

    /// Host accepts a pending request.
    pub async fn confirm_reservation(&self, id: &str, caller: &str) -> DomainResult<Reservation> {
        let mut reservation = self.load_reservation(id).await?;
        let space = self.load_space(&reservation.space_id).await?;
        if !space.is_hosted_by(caller) {
            return Err(DomainError::Forbidden(
                "only the host can confirm this reservation".to_string(),
            ));
        }

        let lock = self.space_lock(&space.id);
        let _guard = lock.lock().await;

        let from = reservation.status;
        reservation.confirm()?;
        self.repos.reservations().update_status(&reservation, from).await?;
        info!(reservation_id = %reservation.id, space_id = %space.id, "Reservation confirmed");
        Ok(reservation)
    }

    /// Guest or host releases the slot.
    pub async fn cancel_reservation(&self, id: &str, caller: &str) -> DomainResult<Reservation> {
        let mut reservation = self.load_reservation(id).await?;
        if reservation.user_id != caller {
            let space = self.load_space(&reservation.space_id).await?;
            if !space.is_hosted_by(caller) {
                return Err(DomainError::Forbidden(
                    "not a party to this reservation".to_string(),
                ));
            }
        }

        let lock = self.space_lock(&reservation.space_id);
        let _guard = lock.lock().await;

        let from = reservation.status;
        reservation.cancel()?;
        self.repos.reservations().update_status(&reservation, from).await?;
        info!(
            reservation_id = %reservation.id,
            cancelled_by = %caller,
            "Reservation cancelled"
        );
        Ok(reservation)
    }

    /// Mark confirmed reservations that ended at or before `now` as completed.
    ///
    /// Returns how many were completed. One failing row does not stop the rest.
    pub async fn complete_elapsed(&self, now: DateTime<Utc>) -> DomainResult<usize> {
        let elapsed = self.repos.reservations().find_elapsed_confirmed(now).await?;
        if elapsed.is_empty() {
            return Ok(0);
        }
        debug!(count = elapsed.len(), "Completing elapsed reservations");

        let mut completed = 0;
        for mut reservation in elapsed {
            let from = reservation.status;
            if let Err(e) = reservation.complete() {
                warn!(reservation_id = %reservation.id, error = %e, "Skipping reservation");
                continue;
            }
            match self.repos.reservations().update_status(&reservation, from).await {
                Ok(()) => completed += 1,
                Err(e) => warn!(reservation_id = %reservation.id, error = %e, "Failed to complete reservation"),
            }
        }

        metrics::counter!("reservations_completed_total").increment(completed as u64);
        Ok(completed)
    }
}
