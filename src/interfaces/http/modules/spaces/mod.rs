//! Spaces module: listing creation, lookup and search

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
