//! SeaORM implementation of RepositoryProvider

use sea_orm::DatabaseConnection;

use crate::domain::availability::AvailabilityRepository;
use crate::domain::repositories::RepositoryProvider;
use crate::domain::reservation::ReservationRepository;
use crate::domain::space::SpaceRepository;

use super::availability_repository::SeaOrmAvailabilityRepository;
use super::reservation_repository::SeaOrmReservationRepository;
use super::space_repository::SeaOrmSpaceRepository;

/// Unified repository provider backed by SeaORM.
///
/// Holds one connection pool and exposes per-aggregate repository accessors.
///
/// ```ignore
/// let repos = SeaOrmRepositoryProvider::new(db.clone());
/// let space = repos.spaces().find_by_id("S1").await?;
/// let booking = repos.reservations().find_by_id("R1").await?;
/// ```
pub struct SeaOrmRepositoryProvider {
    db: DatabaseConnection,
    spaces: SeaOrmSpaceRepository,
    reservations: SeaOrmReservationRepository,
    availability: SeaOrmAvailabilityRepository,
}

impl SeaOrmRepositoryProvider {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            spaces: SeaOrmSpaceRepository::new(db.clone()),
            reservations: SeaOrmReservationRepository::new(db.clone()),
            availability: SeaOrmAvailabilityRepository::new(db.clone()),
            db,
        }
    }

    /// Underlying connection, for health checks.
    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }
}

impl RepositoryProvider for SeaOrmRepositoryProvider {
    fn spaces(&self) -> &dyn SpaceRepository {
        &self.spaces
    }

    fn reservations(&self) -> &dyn ReservationRepository {
        &self.reservations
    }

    fn availability(&self) -> &dyn AvailabilityRepository {
        &self.availability
    }
}
