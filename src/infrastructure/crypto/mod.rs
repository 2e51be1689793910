//! Token verification for guests and hosts

pub mod jwt;

pub use jwt::{verify_token, JwtConfig, TokenClaims};
