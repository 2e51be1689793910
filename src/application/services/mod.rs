//! Application services

mod availability;
mod booking;
mod completion;
mod spaces;

pub use availability::{AvailabilityService, NewAvailability};
pub use booking::{BookingService, NewReservation};
pub use completion::start_reservation_completion_task;
pub use spaces::{NewSpace, SpaceService};
