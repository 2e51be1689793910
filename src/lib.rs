//! # Event space booking service
//!
//! Marketplace backend where hosts list event spaces and guests book them
//! by the hour.
//!
//! ## Architecture
//!
//! - **domain**: spaces, reservations, availability rules, the slot
//!   conflict rule and repository traits
//! - **application**: booking, listing and schedule services plus the
//!   reservation completion task
//! - **infrastructure**: SeaORM persistence and JWT verification
//! - **interfaces**: REST API with Swagger documentation
//! - **server**: process lifecycle shared by the CLI

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod shared;

pub use config::{default_config_path, AppConfig};

// Re-export database types for easy access
pub use infrastructure::{init_database, run_migrations, DatabaseConfig, SeaOrmRepositoryProvider};

// Re-export API router
pub use interfaces::http::{create_api_router, ApiContext, ApiDoc};
