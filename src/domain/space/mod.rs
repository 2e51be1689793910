//! Space aggregate
//!
//! Contains the Space (listing) entity, search criteria, and repository interface.

pub mod model;
pub mod repository;

pub use model::{Space, SpaceCategory, SpaceFeatures, SpaceFilter};
pub use repository::SpaceRepository;
