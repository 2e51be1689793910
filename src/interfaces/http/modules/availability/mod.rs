//! Availability module: a host's weekly schedule and blocked dates

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
