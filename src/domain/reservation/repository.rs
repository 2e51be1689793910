//! Reservation repository interface

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::model::{Reservation, ReservationStatus};
use crate::domain::DomainResult;
use crate::shared::{PaginatedResult, PaginationParams};

/// Listing filter; `None` fields do not constrain the result.
#[derive(Debug, Clone, Default)]
pub struct ReservationFilter {
    pub space_id: Option<String>,
    /// Guest who booked
    pub user_id: Option<String>,
    /// Host owning the booked space
    pub host_id: Option<String>,
    pub status: Option<ReservationStatus>,
}

#[async_trait]
pub trait ReservationRepository: Send + Sync {
    /// Insert `reservation` unless an active reservation of the same space
    /// overlaps its slot.
    ///
    /// The conflict check and the insert are atomic with respect to other
    /// callers of this method. Fails with `SlotUnavailable` on conflict.
    async fn create_if_available(&self, reservation: Reservation) -> DomainResult<Reservation>;

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Reservation>>;

    /// Persist a status change made on the domain entity, provided the
    /// stored status is still `from`.
    ///
    /// Fails with `Validation` when another writer changed the status first,
    /// so a stale copy can never bring a cancelled booking back to life.
    async fn update_status(&self, reservation: &Reservation, from: ReservationStatus) -> DomainResult<()>;

    /// Newest first.
    async fn list(
        &self,
        filter: &ReservationFilter,
        page: PaginationParams,
    ) -> DomainResult<PaginatedResult<Reservation>>;

    /// Confirmed reservations whose slot ended at or before `now`.
    async fn find_elapsed_confirmed(&self, now: DateTime<Utc>) -> DomainResult<Vec<Reservation>>;
}
