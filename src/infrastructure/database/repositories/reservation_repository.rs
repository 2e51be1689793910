//! SeaORM implementation of ReservationRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, QueryTrait, Set, TransactionTrait,
};
use tracing::debug;

use crate::domain::reservation::{
    ensure_available, EventType, Reservation, ReservationFilter, ReservationRepository,
    ReservationStatus, TimeSlot,
};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::{reservation, space};
use crate::shared::{PaginatedResult, PaginationParams};

pub struct SeaOrmReservationRepository {
    db: DatabaseConnection,
}

impl SeaOrmReservationRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn status_to_db(status: ReservationStatus) -> reservation::ReservationStatus {
    match status {
        ReservationStatus::Pending => reservation::ReservationStatus::Pending,
        ReservationStatus::Confirmed => reservation::ReservationStatus::Confirmed,
        ReservationStatus::Completed => reservation::ReservationStatus::Completed,
        ReservationStatus::Cancelled => reservation::ReservationStatus::Cancelled,
    }
}

fn status_from_db(status: reservation::ReservationStatus) -> ReservationStatus {
    match status {
        reservation::ReservationStatus::Pending => ReservationStatus::Pending,
        reservation::ReservationStatus::Confirmed => ReservationStatus::Confirmed,
        reservation::ReservationStatus::Completed => ReservationStatus::Completed,
        reservation::ReservationStatus::Cancelled => ReservationStatus::Cancelled,
    }
}

fn model_to_domain(m: reservation::Model) -> DomainResult<Reservation> {
    let slot = TimeSlot::new(m.start_time, m.end_time).map_err(|_| {
        DomainError::Storage(format!("reservation {} has an empty time window", m.id))
    })?;
    Ok(Reservation {
        id: m.id,
        space_id: m.space_id,
        user_id: m.user_id,
        slot,
        duration_hours: m.duration_hours,
        hourly_rate: m.hourly_rate,
        cleaning_fee: m.cleaning_fee,
        service_fee: m.service_fee,
        total_price: m.total_price,
        event_type: EventType::from_str(&m.event_type),
        guest_count: m.guest_count,
        event_details: m.event_details,
        status: status_from_db(m.status),
        instant_booked: m.instant_booked,
        created_at: m.created_at,
        updated_at: m.updated_at,
    })
}

fn models_to_domain(models: Vec<reservation::Model>) -> DomainResult<Vec<Reservation>> {
    models.into_iter().map(model_to_domain).collect()
}

fn domain_to_active(r: &Reservation) -> reservation::ActiveModel {
    reservation::ActiveModel {
        id: Set(r.id.clone()),
        space_id: Set(r.space_id.clone()),
        user_id: Set(r.user_id.clone()),
        start_time: Set(r.slot.start()),
        end_time: Set(r.slot.end()),
        duration_hours: Set(r.duration_hours),
        hourly_rate: Set(r.hourly_rate),
        cleaning_fee: Set(r.cleaning_fee),
        service_fee: Set(r.service_fee),
        total_price: Set(r.total_price),
        event_type: Set(r.event_type.as_str().to_string()),
        guest_count: Set(r.guest_count),
        event_details: Set(r.event_details.clone()),
        status: Set(status_to_db(r.status)),
        instant_booked: Set(r.instant_booked),
        created_at: Set(r.created_at),
        updated_at: Set(r.updated_at),
    }
}

/// Rows that hold `slot`: active and overlapping the half-open window.
pub(crate) fn holds_slot(slot: &TimeSlot) -> Condition {
    Condition::all()
        .add(
            reservation::Column::Status.is_in(
                ReservationStatus::ACTIVE
                    .into_iter()
                    .map(status_to_db)
                    .collect::<Vec<_>>(),
            ),
        )
        .add(reservation::Column::StartTime.lt(slot.end()))
        .add(reservation::Column::EndTime.gt(slot.start()))
}

fn filter_condition(filter: &ReservationFilter) -> Condition {
    let mut cond = Condition::all();
    if let Some(space_id) = &filter.space_id {
        cond = cond.add(reservation::Column::SpaceId.eq(space_id.as_str()));
    }
    if let Some(user_id) = &filter.user_id {
        cond = cond.add(reservation::Column::UserId.eq(user_id.as_str()));
    }
    if let Some(host_id) = &filter.host_id {
        let hosted = space::Entity::find()
            .select_only()
            .column(space::Column::Id)
            .filter(space::Column::HostId.eq(host_id.as_str()))
            .into_query();
        cond = cond.add(reservation::Column::SpaceId.in_subquery(hosted));
    }
    if let Some(status) = filter.status {
        cond = cond.add(reservation::Column::Status.eq(status_to_db(status)));
    }
    cond
}

// ── ReservationRepository impl ──────────────────────────────────

#[async_trait]
impl ReservationRepository for SeaOrmReservationRepository {
    async fn create_if_available(&self, r: Reservation) -> DomainResult<Reservation> {
        debug!(reservation_id = %r.id, space_id = %r.space_id, "Inserting reservation");

        let txn = self.db.begin().await?;

        let candidates = reservation::Entity::find()
            .filter(reservation::Column::SpaceId.eq(r.space_id.as_str()))
            .filter(holds_slot(&r.slot))
            .all(&txn)
            .await?;
        let candidates = models_to_domain(candidates)?;

        // Dropping `txn` on the error path rolls it back.
        ensure_available(&r.space_id, &r.slot, &candidates)?;

        let inserted = domain_to_active(&r).insert(&txn).await?;
        txn.commit().await?;

        model_to_domain(inserted)
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Reservation>> {
        let model = reservation::Entity::find_by_id(id.to_string())
            .one(&self.db)
            .await?;
        model.map(model_to_domain).transpose()
    }

    async fn update_status(&self, r: &Reservation, from: ReservationStatus) -> DomainResult<()> {
        debug!(reservation_id = %r.id, %from, to = %r.status, "Updating reservation status");

        let result = reservation::Entity::update_many()
            .col_expr(reservation::Column::Status, Expr::value(status_to_db(r.status)))
            .col_expr(reservation::Column::UpdatedAt, Expr::value(r.updated_at))
            .filter(reservation::Column::Id.eq(r.id.as_str()))
            .filter(reservation::Column::Status.eq(status_to_db(from)))
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            return match self.find_by_id(&r.id).await? {
                None => Err(DomainError::not_found("Reservation", r.id.clone())),
                Some(current) => Err(DomainError::Validation(format!(
                    "reservation {} is {}, expected {}",
                    r.id, current.status, from
                ))),
            };
        }
        Ok(())
    }

    async fn list(
        &self,
        filter: &ReservationFilter,
        page: PaginationParams,
    ) -> DomainResult<PaginatedResult<Reservation>> {
        let paginator = reservation::Entity::find()
            .filter(filter_condition(filter))
            .order_by_desc(reservation::Column::CreatedAt)
            .order_by_desc(reservation::Column::Id)
            .paginate(&self.db, page.limit);

        let total = paginator.num_items().await?;
        let models = paginator.fetch_page(page.page - 1).await?;
        Ok(PaginatedResult::new(models_to_domain(models)?, total, page))
    }

    async fn find_elapsed_confirmed(&self, now: DateTime<Utc>) -> DomainResult<Vec<Reservation>> {
        let models = reservation::Entity::find()
            .filter(reservation::Column::Status.eq(reservation::ReservationStatus::Confirmed))
            .filter(reservation::Column::EndTime.lte(now))
            .all(&self.db)
            .await?;
        models_to_domain(models)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::space::SpaceRepository;
    use crate::infrastructure::database::repositories::fixtures::{at, reservation_between, space};
    use crate::infrastructure::database::repositories::SeaOrmSpaceRepository;
    use crate::infrastructure::database::test_database;

    async fn setup() -> SeaOrmReservationRepository {
        let db = test_database().await;
        let spaces = SeaOrmSpaceRepository::new(db.clone());
        spaces.save(space("S1", "host-1")).await.unwrap();
        spaces.save(space("S2", "host-2")).await.unwrap();
        SeaOrmReservationRepository::new(db)
    }

    #[tokio::test]
    async fn overlapping_insert_is_rejected() {
        let repo = setup().await;
        repo.create_if_available(reservation_between("R1", "S1", (10, 0), (12, 0)))
            .await
            .unwrap();

        let err = repo
            .create_if_available(reservation_between("R2", "S1", (11, 0), (13, 0)))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::SlotUnavailable { .. }));
        assert!(repo.find_by_id("R2").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn back_to_back_and_other_space_are_accepted() {
        let repo = setup().await;
        repo.create_if_available(reservation_between("R1", "S1", (10, 0), (12, 0)))
            .await
            .unwrap();
        repo.create_if_available(reservation_between("R2", "S1", (12, 0), (14, 0)))
            .await
            .unwrap();
        repo.create_if_available(reservation_between("R3", "S2", (10, 0), (12, 0)))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn cancelled_reservation_frees_the_slot() {
        let repo = setup().await;
        let mut first = repo
            .create_if_available(reservation_between("R1", "S1", (10, 0), (12, 0)))
            .await
            .unwrap();
        first.cancel().unwrap();
        repo.update_status(&first, ReservationStatus::Pending).await.unwrap();

        repo.create_if_available(reservation_between("R2", "S1", (10, 0), (12, 0)))
            .await
            .unwrap();
        let stored = repo.find_by_id("R1").await.unwrap().unwrap();
        assert_eq!(stored.status, ReservationStatus::Cancelled);
    }

    #[tokio::test]
    async fn status_write_from_a_stale_copy_is_refused() {
        let repo = setup().await;
        let stale = repo
            .create_if_available(reservation_between("R1", "S1", (10, 0), (12, 0)))
            .await
            .unwrap();

        let mut cancelled = stale.clone();
        cancelled.cancel().unwrap();
        repo.update_status(&cancelled, ReservationStatus::Pending).await.unwrap();

        let mut confirmed = stale;
        confirmed.confirm().unwrap();
        let err = repo
            .update_status(&confirmed, ReservationStatus::Pending)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        let stored = repo.find_by_id("R1").await.unwrap().unwrap();
        assert_eq!(stored.status, ReservationStatus::Cancelled);
    }

    #[tokio::test]
    async fn status_write_to_unknown_reservation_is_not_found() {
        let repo = setup().await;
        let mut ghost = reservation_between("R9", "S1", (10, 0), (12, 0));
        ghost.cancel().unwrap();
        assert!(matches!(
            repo.update_status(&ghost, ReservationStatus::Pending).await,
            Err(DomainError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn list_filters_by_host_and_status() {
        let repo = setup().await;
        repo.create_if_available(reservation_between("R1", "S1", (10, 0), (12, 0)))
            .await
            .unwrap();
        repo.create_if_available(reservation_between("R2", "S2", (10, 0), (12, 0)))
            .await
            .unwrap();

        let hosted = repo
            .list(
                &ReservationFilter {
                    host_id: Some("host-2".into()),
                    ..Default::default()
                },
                PaginationParams::default(),
            )
            .await
            .unwrap();
        assert_eq!(hosted.total, 1);
        assert_eq!(hosted.items[0].id, "R2");

        let confirmed = repo
            .list(
                &ReservationFilter {
                    status: Some(ReservationStatus::Confirmed),
                    ..Default::default()
                },
                PaginationParams::default(),
            )
            .await
            .unwrap();
        assert_eq!(confirmed.total, 0);
    }

    #[tokio::test]
    async fn elapsed_confirmed_reservations_are_found() {
        let repo = setup().await;
        let mut r = reservation_between("R1", "S1", (10, 0), (12, 0));
        r.status = ReservationStatus::Confirmed;
        repo.create_if_available(r).await.unwrap();
        repo.create_if_available(reservation_between("R2", "S1", (12, 0), (13, 0)))
            .await
            .unwrap();

        assert!(repo.find_elapsed_confirmed(at(11, 0)).await.unwrap().is_empty());
        let elapsed = repo.find_elapsed_confirmed(at(12, 0)).await.unwrap();
        assert_eq!(elapsed.len(), 1);
        assert_eq!(elapsed[0].id, "R1");
    }
}
