//! Domain layer: marketplace entities, booking rules and repository traits.

pub mod availability;
pub mod pricing;
pub mod repositories;
pub mod reservation;
pub mod space;

pub use availability::{AvailabilityPatch, AvailabilityRepository, AvailabilityRule};
pub use pricing::PricingBreakdown;
pub use repositories::{DomainResult, RepositoryProvider};
pub use reservation::{
    EventType, Reservation, ReservationFilter, ReservationRepository, ReservationStatus, TimeSlot,
};
pub use space::{Space, SpaceCategory, SpaceFeatures, SpaceFilter, SpaceRepository};

// Re-export DomainError from shared for convenience
pub use crate::shared::errors::DomainError;
