//! Listing service: create, fetch and search spaces

use std::sync::Arc;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::domain::{
    DomainError, DomainResult, RepositoryProvider, Space, SpaceCategory, SpaceFeatures, SpaceFilter,
};
use crate::shared::{PaginatedResult, PaginationParams};

/// Host-supplied listing attributes; `None` takes the listing default.
#[derive(Debug, Clone, Default)]
pub struct NewSpace {
    pub title: String,
    pub description: String,
    pub image_src: String,
    pub images: Vec<String>,
    pub category: Option<SpaceCategory>,
    pub room_count: Option<i32>,
    pub bathroom_count: Option<i32>,
    pub capacity: i32,
    pub square_footage: Option<i32>,
    pub location_value: String,
    pub address: Option<String>,
    pub floor: Option<String>,
    pub access_instructions: Option<String>,
    pub hourly_rate: i64,
    pub minimum_hours: Option<i32>,
    pub cleaning_fee: Option<i64>,
    pub features: SpaceFeatures,
    pub instant_book: Option<bool>,
    pub same_day_booking: Option<bool>,
    pub turnaround_time: Option<i32>,
    pub rules: Vec<String>,
    pub allowed_activities: Vec<String>,
    pub parking: Option<String>,
    pub accessibility: Option<bool>,
    pub wifi_available: Option<bool>,
    pub kitchen_available: Option<bool>,
    pub outdoor_space: Option<bool>,
}

pub struct SpaceService {
    repos: Arc<dyn RepositoryProvider>,
}

impl SpaceService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    pub async fn create_space(&self, host_id: &str, input: NewSpace) -> DomainResult<Space> {
        let category = input
            .category
            .ok_or_else(|| DomainError::Validation("category is required".to_string()))?;
        if input.capacity < 1 {
            return Err(DomainError::Validation("capacity must be at least 1".to_string()));
        }
        if input.hourly_rate < 1 {
            return Err(DomainError::Validation("hourly_rate must be at least 1".to_string()));
        }

        let now = Utc::now();
        let space = Space {
            id: Uuid::new_v4().to_string(),
            host_id: host_id.to_string(),
            title: input.title,
            description: input.description,
            image_src: input.image_src,
            images: input.images,
            category,
            room_count: input.room_count,
            bathroom_count: input.bathroom_count.unwrap_or(1),
            capacity: input.capacity,
            square_footage: input.square_footage,
            location_value: input.location_value,
            address: input.address,
            floor: input.floor,
            access_instructions: input.access_instructions,
            hourly_rate: input.hourly_rate,
            minimum_hours: input.minimum_hours.unwrap_or(2),
            cleaning_fee: input.cleaning_fee.unwrap_or(0),
            features: input.features,
            instant_book: input.instant_book.unwrap_or(false),
            same_day_booking: input.same_day_booking.unwrap_or(true),
            turnaround_time: input.turnaround_time.unwrap_or(2),
            rules: input.rules,
            allowed_activities: input.allowed_activities,
            parking: input.parking,
            accessibility: input.accessibility.unwrap_or(false),
            wifi_available: input.wifi_available.unwrap_or(true),
            kitchen_available: input.kitchen_available.unwrap_or(false),
            outdoor_space: input.outdoor_space.unwrap_or(false),
            created_at: now,
            updated_at: now,
        };

        let saved = self.repos.spaces().save(space).await?;
        info!(space_id = %saved.id, host_id = %saved.host_id, category = %saved.category, "Space listed");
        Ok(saved)
    }

    pub async fn get_space(&self, id: &str) -> DomainResult<Space> {
        self.repos
            .spaces()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Space", id))
    }

    /// Newest first. With `available_during` set, spaces holding an active
    /// reservation overlapping that window are left out.
    pub async fn search_spaces(
        &self,
        filter: &SpaceFilter,
        page: PaginationParams,
    ) -> DomainResult<PaginatedResult<Space>> {
        self.repos.spaces().search(filter, page).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::database::test_database;
    use crate::infrastructure::SeaOrmRepositoryProvider;

    fn listing() -> NewSpace {
        NewSpace {
            title: "Rooftop".into(),
            description: "City views".into(),
            image_src: "https://img.example/roof.jpg".into(),
            category: Some(SpaceCategory::Party),
            capacity: 40,
            location_value: "LA".into(),
            hourly_rate: 120,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn create_applies_listing_defaults() {
        let repos = Arc::new(SeaOrmRepositoryProvider::new(test_database().await));
        let svc = SpaceService::new(repos);
        let space = svc.create_space("host-1", listing()).await.unwrap();
        assert_eq!(space.host_id, "host-1");
        assert_eq!(space.bathroom_count, 1);
        assert_eq!(space.minimum_hours, 2);
        assert_eq!(space.turnaround_time, 2);
        assert!(space.same_day_booking);
        assert!(space.wifi_available);
        assert!(!space.instant_book);

        let loaded = svc.get_space(&space.id).await.unwrap();
        assert_eq!(loaded.title, "Rooftop");
    }

    #[tokio::test]
    async fn create_rejects_missing_category_and_zero_capacity() {
        let repos = Arc::new(SeaOrmRepositoryProvider::new(test_database().await));
        let svc = SpaceService::new(repos);
        let no_category = NewSpace {
            category: None,
            ..listing()
        };
        assert!(matches!(
            svc.create_space("host-1", no_category).await,
            Err(DomainError::Validation(_))
        ));
        let empty = NewSpace {
            capacity: 0,
            ..listing()
        };
        assert!(svc.create_space("host-1", empty).await.is_err());
    }

    #[tokio::test]
    async fn unknown_space_is_not_found() {
        let repos = Arc::new(SeaOrmRepositoryProvider::new(test_database().await));
        let svc = SpaceService::new(repos);
        assert!(matches!(
            svc.get_space("nope").await,
            Err(DomainError::NotFound { .. })
        ));
    }
}
