//! Infrastructure layer - external concerns

pub mod crypto;
pub mod database;

pub use crypto::{JwtConfig, TokenClaims};
pub use database::repositories::SeaOrmRepositoryProvider;
pub use database::{init_database, run_migrations, DatabaseConfig};
