//! Reservation aggregate
//!
//! Contains the Reservation entity, the booking-window conflict rules,
//! and the repository interface.

pub mod conflict;
pub mod model;
pub mod repository;

pub use conflict::{ensure_available, first_conflict, has_conflict};
pub use model::{EventType, Reservation, ReservationStatus, TimeSlot};
pub use repository::{ReservationFilter, ReservationRepository};
