//! Application layer: booking use cases on top of the domain repositories

pub mod services;

pub use services::{
    start_reservation_completion_task, AvailabilityService, BookingService, NewAvailability,
    NewReservation, NewSpace, SpaceService,
};
