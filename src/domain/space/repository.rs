//! Space repository interface

use async_trait::async_trait;

use super::model::{Space, SpaceFilter};
use crate::domain::DomainResult;
use crate::shared::{PaginatedResult, PaginationParams};

#[async_trait]
pub trait SpaceRepository: Send + Sync {
    async fn save(&self, space: Space) -> DomainResult<Space>;

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Space>>;

    /// Spaces matching `filter`, newest first.
    async fn search(
        &self,
        filter: &SpaceFilter,
        page: PaginationParams,
    ) -> DomainResult<PaginatedResult<Space>>;
}
