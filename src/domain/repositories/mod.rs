//! Repository traits for the domain layer
//!
//! Contains:
//! - `RepositoryProvider`: unified access to all per-aggregate repositories
//! - `DomainResult`: standard result type for domain operations

use super::availability::AvailabilityRepository;
use super::reservation::ReservationRepository;
use super::space::SpaceRepository;
use crate::shared::errors::DomainError;

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Provides access to all domain repositories.
///
/// Consumers request only the repository they need:
///
/// ```ignore
/// async fn handle(repos: &dyn RepositoryProvider) {
///     let space = repos.spaces().find_by_id("S1").await?;
///     let created = repos.reservations().create_if_available(reservation).await?;
/// }
/// ```
pub trait RepositoryProvider: Send + Sync {
    fn spaces(&self) -> &dyn SpaceRepository;
    fn reservations(&self) -> &dyn ReservationRepository;
    fn availability(&self) -> &dyn AvailabilityRepository;
}
