//! Availability aggregate
//!
//! Weekly opening hours and blocked dates a host attaches to a space.

pub mod model;
pub mod repository;

pub use model::{AvailabilityPatch, AvailabilityRule};
pub use repository::AvailabilityRepository;
