//! Database repository implementations
//!
//! Per-aggregate SeaORM repositories + unified RepositoryProvider.

pub mod availability_repository;
pub mod repository_provider;
pub mod reservation_repository;
pub mod space_repository;

pub use availability_repository::SeaOrmAvailabilityRepository;
pub use repository_provider::SeaOrmRepositoryProvider;
pub use reservation_repository::SeaOrmReservationRepository;
pub use space_repository::SeaOrmSpaceRepository;
