//! Availability repository interface

use async_trait::async_trait;

use super::model::AvailabilityRule;
use crate::domain::DomainResult;

#[async_trait]
pub trait AvailabilityRepository: Send + Sync {
    async fn save(&self, rule: AvailabilityRule) -> DomainResult<AvailabilityRule>;

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<AvailabilityRule>>;

    /// Ordered by day of week, then start time.
    async fn list_for_space(&self, space_id: &str) -> DomainResult<Vec<AvailabilityRule>>;

    async fn update(&self, rule: &AvailabilityRule) -> DomainResult<()>;

    async fn delete(&self, id: &str) -> DomainResult<()>;
}
