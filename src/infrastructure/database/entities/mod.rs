//! Database entities module

pub mod availability;
pub mod reservation;
pub mod space;

pub use availability::Entity as Availability;
pub use reservation::Entity as Reservation;
pub use space::Entity as Space;
