//! Reservation conflict detection.
//!
//! A proposed window conflicts with an existing reservation when the
//! reservation belongs to the same space, is active (`pending` or
//! `confirmed`), and the two half-open windows overlap. Back-to-back
//! windows (`existing.end == proposed.start` or
//! `proposed.end == existing.start`) never conflict.

use super::model::{Reservation, TimeSlot};
use crate::domain::DomainResult;
use crate::shared::errors::DomainError;

/// Whether `existing` blocks `proposed` on `space_id`.
pub fn blocks(existing: &Reservation, space_id: &str, proposed: &TimeSlot) -> bool {
    existing.space_id == space_id && existing.is_active() && existing.slot.overlaps(proposed)
}

/// First reservation that blocks `proposed`, if any.
pub fn first_conflict<'a, I>(space_id: &str, proposed: &TimeSlot, existing: I) -> Option<&'a Reservation>
where
    I: IntoIterator<Item = &'a Reservation>,
{
    existing
        .into_iter()
        .find(|r| blocks(r, space_id, proposed))
}

pub fn has_conflict<'a, I>(space_id: &str, proposed: &TimeSlot, existing: I) -> bool
where
    I: IntoIterator<Item = &'a Reservation>,
{
    first_conflict(space_id, proposed, existing).is_some()
}

/// `Ok(())` when the window is free, `SlotUnavailable` otherwise.
pub fn ensure_available<'a, I>(space_id: &str, proposed: &TimeSlot, existing: I) -> DomainResult<()>
where
    I: IntoIterator<Item = &'a Reservation>,
{
    match first_conflict(space_id, proposed, existing) {
        Some(_) => Err(DomainError::SlotUnavailable {
            space_id: space_id.to_string(),
        }),
        None => Ok(()),
    }
}
