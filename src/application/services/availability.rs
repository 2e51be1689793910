//! Availability schedule service
//!
//! Only the host of a space may change its schedule. Rules are
//! informational and never consulted by the booking conflict check.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::domain::availability::model::{DEFAULT_CLOSES_AT, DEFAULT_OPENS_AT};
use crate::domain::{
    AvailabilityPatch, AvailabilityRule, DomainError, DomainResult, RepositoryProvider,
};

/// New rule; `None` fields take the schedule defaults.
#[derive(Debug, Clone, Default)]
pub struct NewAvailability {
    pub space_id: String,
    pub day_of_week: Option<i32>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub block_date: Option<chrono::DateTime<Utc>>,
    pub is_blocked: Option<bool>,
}

pub struct AvailabilityService {
    repos: Arc<dyn RepositoryProvider>,
}

impl AvailabilityService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    async fn ensure_host(&self, space_id: &str, caller: &str) -> DomainResult<()> {
        let space = self
            .repos
            .spaces()
            .find_by_id(space_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Space", space_id))?;
        if !space.is_hosted_by(caller) {
            return Err(DomainError::Forbidden(
                "only the host can change this schedule".to_string(),
            ));
        }
        Ok(())
    }

    async fn load_rule(&self, id: &str) -> DomainResult<AvailabilityRule> {
        self.repos
            .availability()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Availability", id))
    }

    pub async fn create(&self, caller: &str, input: NewAvailability) -> DomainResult<AvailabilityRule> {
        self.ensure_host(&input.space_id, caller).await?;

        let rule = AvailabilityRule {
            id: Uuid::new_v4().to_string(),
            space_id: input.space_id,
            day_of_week: input.day_of_week.unwrap_or(0),
            start_time: input.start_time.unwrap_or_else(|| DEFAULT_OPENS_AT.to_string()),
            end_time: input.end_time.unwrap_or_else(|| DEFAULT_CLOSES_AT.to_string()),
            block_date: input.block_date,
            is_blocked: input.is_blocked.unwrap_or(false),
            created_at: Utc::now(),
        };
        rule.validate()?;

        let saved = self.repos.availability().save(rule).await?;
        info!(rule_id = %saved.id, space_id = %saved.space_id, "Availability rule added");
        Ok(saved)
    }

    /// Public. Unknown spaces are a 404, not an empty list.
    pub async fn list_for_space(&self, space_id: &str) -> DomainResult<Vec<AvailabilityRule>> {
        if self.repos.spaces().find_by_id(space_id).await?.is_none() {
            return Err(DomainError::not_found("Space", space_id));
        }
        self.repos.availability().list_for_space(space_id).await
    }

    pub async fn update(
        &self,
        id: &str,
        caller: &str,
        patch: AvailabilityPatch,
    ) -> DomainResult<AvailabilityRule> {
        let mut rule = self.load_rule(id).await?;
        self.ensure_host(&rule.space_id, caller).await?;

        rule.apply(patch)?;
        self.repos.availability().update(&rule).await?;
        Ok(rule)
    }

    pub async fn delete(&self, id: &str, caller: &str) -> DomainResult<()> {
        let rule = self.load_rule(id).await?;
        self.ensure_host(&rule.space_id, caller).await?;
        self.repos.availability().delete(id).await?;
        info!(rule_id = %id, space_id = %rule.space_id, "Availability rule removed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::SpaceRepository;
    use crate::infrastructure::database::repositories::fixtures::space;
    use crate::infrastructure::database::test_database;
    use crate::infrastructure::SeaOrmRepositoryProvider;

    async fn service() -> AvailabilityService {
        let repos = Arc::new(SeaOrmRepositoryProvider::new(test_database().await));
        repos.spaces().save(space("S1", "host-1")).await.unwrap();
        AvailabilityService::new(repos)
    }

    fn for_s1() -> NewAvailability {
        NewAvailability {
            space_id: "S1".into(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn create_uses_schedule_defaults() {
        let svc = service().await;
        let rule = svc.create("host-1", for_s1()).await.unwrap();
        assert_eq!(rule.day_of_week, 0);
        assert_eq!(rule.start_time, "09:00");
        assert_eq!(rule.end_time, "22:00");
        assert!(!rule.is_blocked);
        assert_eq!(svc.list_for_space("S1").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn non_host_is_forbidden() {
        let svc = service().await;
        assert!(matches!(
            svc.create("guest-1", for_s1()).await,
            Err(DomainError::Forbidden(_))
        ));

        let rule = svc.create("host-1", for_s1()).await.unwrap();
        assert!(matches!(
            svc.delete(&rule.id, "guest-1").await,
            Err(DomainError::Forbidden(_))
        ));
        assert!(matches!(
            svc.update(&rule.id, "guest-1", AvailabilityPatch::default()).await,
            Err(DomainError::Forbidden(_))
        ));
    }

    #[tokio::test]
    async fn unknown_space_is_not_found() {
        let svc = service().await;
        let input = NewAvailability {
            space_id: "missing".into(),
            ..Default::default()
        };
        assert!(matches!(
            svc.create("host-1", input).await,
            Err(DomainError::NotFound { .. })
        ));
        assert!(matches!(
            svc.list_for_space("missing").await,
            Err(DomainError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn patch_persists_and_validates() {
        let svc = service().await;
        let rule = svc.create("host-1", for_s1()).await.unwrap();

        let patched = svc
            .update(
                &rule.id,
                "host-1",
                AvailabilityPatch {
                    day_of_week: Some(5),
                    is_blocked: Some(true),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(patched.day_of_week, 5);

        let bad = svc
            .update(
                &rule.id,
                "host-1",
                AvailabilityPatch {
                    end_time: Some("08:00".into()),
                    ..Default::default()
                },
            )
            .await;
        assert!(matches!(bad, Err(DomainError::Validation(_))));

        let stored = svc.list_for_space("S1").await.unwrap();
        assert_eq!(stored[0].day_of_week, 5);
        assert_eq!(stored[0].end_time, "22:00");
    }
}
