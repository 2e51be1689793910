//! SeaORM implementation of AvailabilityRepository

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};
use tracing::debug;

use crate::domain::availability::{AvailabilityRepository, AvailabilityRule};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::availability;

pub struct SeaOrmAvailabilityRepository {
    db: DatabaseConnection,
}

impl SeaOrmAvailabilityRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn model_to_domain(m: availability::Model) -> AvailabilityRule {
    AvailabilityRule {
        id: m.id,
        space_id: m.space_id,
        day_of_week: m.day_of_week,
        start_time: m.start_time,
        end_time: m.end_time,
        block_date: m.block_date,
        is_blocked: m.is_blocked,
        created_at: m.created_at,
    }
}

#[async_trait]
impl AvailabilityRepository for SeaOrmAvailabilityRepository {
    async fn save(&self, rule: AvailabilityRule) -> DomainResult<AvailabilityRule> {
        debug!(rule_id = %rule.id, space_id = %rule.space_id, "Saving availability rule");

        let model = availability::ActiveModel {
            id: Set(rule.id),
            space_id: Set(rule.space_id),
            day_of_week: Set(rule.day_of_week),
            start_time: Set(rule.start_time),
            end_time: Set(rule.end_time),
            block_date: Set(rule.block_date),
            is_blocked: Set(rule.is_blocked),
            created_at: Set(rule.created_at),
        };
        let inserted = model.insert(&self.db).await?;
        Ok(model_to_domain(inserted))
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<AvailabilityRule>> {
        let model = availability::Entity::find_by_id(id.to_string())
            .one(&self.db)
            .await?;
        Ok(model.map(model_to_domain))
    }

    async fn list_for_space(&self, space_id: &str) -> DomainResult<Vec<AvailabilityRule>> {
        let models = availability::Entity::find()
            .filter(availability::Column::SpaceId.eq(space_id))
            .order_by_asc(availability::Column::DayOfWeek)
            .order_by_asc(availability::Column::StartTime)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(model_to_domain).collect())
    }

    async fn update(&self, rule: &AvailabilityRule) -> DomainResult<()> {
        let existing = availability::Entity::find_by_id(rule.id.clone())
            .one(&self.db)
            .await?;

        let Some(existing) = existing else {
            return Err(DomainError::not_found("Availability", rule.id.clone()));
        };

        let mut active: availability::ActiveModel = existing.into();
        active.day_of_week = Set(rule.day_of_week);
        active.start_time = Set(rule.start_time.clone());
        active.end_time = Set(rule.end_time.clone());
        active.block_date = Set(rule.block_date);
        active.is_blocked = Set(rule.is_blocked);
        active.update(&self.db).await?;
        Ok(())
    }

    async fn delete(&self, id: &str) -> DomainResult<()> {
        let result = availability::Entity::delete_by_id(id.to_string())
            .exec(&self.db)
            .await?;
        if result.rows_affected == 0 {
            return Err(DomainError::not_found("Availability", id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::space::SpaceRepository;
    use crate::infrastructure::database::repositories::fixtures::space;
    use crate::infrastructure::database::repositories::SeaOrmSpaceRepository;
    use crate::infrastructure::database::test_database;
    use chrono::Utc;

    fn rule(id: &str, day: i32, start: &str) -> AvailabilityRule {
        AvailabilityRule {
            id: id.into(),
            space_id: "S1".into(),
            day_of_week: day,
            start_time: start.into(),
            end_time: "22:00".into(),
            block_date: None,
            is_blocked: false,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn rules_are_listed_by_day_then_start() {
        let db = test_database().await;
        SeaOrmSpaceRepository::new(db.clone())
            .save(space("S1", "host-1"))
            .await
            .unwrap();
        let repo = SeaOrmAvailabilityRepository::new(db);
        repo.save(rule("A1", 3, "09:00")).await.unwrap();
        repo.save(rule("A2", 1, "12:00")).await.unwrap();
        repo.save(rule("A3", 1, "08:00")).await.unwrap();

        let ids: Vec<String> = repo
            .list_for_space("S1")
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, vec!["A3", "A2", "A1"]);
    }

    #[tokio::test]
    async fn update_and_delete() {
        let db = test_database().await;
        SeaOrmSpaceRepository::new(db.clone())
            .save(space("S1", "host-1"))
            .await
            .unwrap();
        let repo = SeaOrmAvailabilityRepository::new(db);
        let mut r = repo.save(rule("A1", 0, "09:00")).await.unwrap();

        r.is_blocked = true;
        repo.update(&r).await.unwrap();
        assert!(repo.find_by_id("A1").await.unwrap().unwrap().is_blocked);

        repo.delete("A1").await.unwrap();
        assert!(repo.find_by_id("A1").await.unwrap().is_none());
        assert!(matches!(
            repo.delete("A1").await,
            Err(DomainError::NotFound { .. })
        ));
    }
}
