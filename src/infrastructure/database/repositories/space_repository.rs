//! SeaORM implementation of SpaceRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, QueryTrait, Set,
};
use tracing::debug;

use super::reservation_repository::holds_slot;
use crate::domain::space::{Space, SpaceCategory, SpaceFeatures, SpaceFilter, SpaceRepository};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::{reservation, space};
use crate::shared::{PaginatedResult, PaginationParams};

pub struct SeaOrmSpaceRepository {
    db: DatabaseConnection,
}

impl SeaOrmSpaceRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn decode_list(column: &str, raw: &str) -> DomainResult<Vec<String>> {
    serde_json::from_str(raw)
        .map_err(|e| DomainError::Storage(format!("corrupt {} list: {}", column, e)))
}

fn encode_list(values: &[String]) -> String {
    serde_json::to_string(values).unwrap_or_else(|_| "[]".to_string())
}

fn model_to_domain(m: space::Model) -> DomainResult<Space> {
    let category = SpaceCategory::parse(&m.category)
        .ok_or_else(|| DomainError::Storage(format!("unknown space category {}", m.category)))?;
    Ok(Space {
        images: decode_list("images", &m.images)?,
        features: SpaceFeatures {
            amenities: decode_list("amenities", &m.amenities)?,
            lighting: decode_list("lighting", &m.lighting)?,
            equipment: decode_list("equipment", &m.equipment)?,
            furniture: decode_list("furniture", &m.furniture)?,
        },
        rules: decode_list("rules", &m.rules)?,
        allowed_activities: decode_list("allowed_activities", &m.allowed_activities)?,
        id: m.id,
        host_id: m.host_id,
        title: m.title,
        description: m.description,
        image_src: m.image_src,
        category,
        room_count: m.room_count,
        bathroom_count: m.bathroom_count,
        capacity: m.capacity,
        square_footage: m.square_footage,
        location_value: m.location_value,
        address: m.address,
        floor: m.floor,
        access_instructions: m.access_instructions,
        hourly_rate: m.hourly_rate,
        minimum_hours: m.minimum_hours,
        cleaning_fee: m.cleaning_fee,
        instant_book: m.instant_book,
        same_day_booking: m.same_day_booking,
        turnaround_time: m.turnaround_time,
        parking: m.parking,
        accessibility: m.accessibility,
        wifi_available: m.wifi_available,
        kitchen_available: m.kitchen_available,
        outdoor_space: m.outdoor_space,
        created_at: m.created_at,
        updated_at: m.updated_at,
    })
}

fn domain_to_active(s: &Space) -> space::ActiveModel {
    space::ActiveModel {
        id: Set(s.id.clone()),
        host_id: Set(s.host_id.clone()),
        title: Set(s.title.clone()),
        description: Set(s.description.clone()),
        image_src: Set(s.image_src.clone()),
        images: Set(encode_list(&s.images)),
        category: Set(s.category.as_str().to_string()),
        room_count: Set(s.room_count),
        bathroom_count: Set(s.bathroom_count),
        capacity: Set(s.capacity),
        square_footage: Set(s.square_footage),
        location_value: Set(s.location_value.clone()),
        address: Set(s.address.clone()),
        floor: Set(s.floor.clone()),
        access_instructions: Set(s.access_instructions.clone()),
        hourly_rate: Set(s.hourly_rate),
        minimum_hours: Set(s.minimum_hours),
        cleaning_fee: Set(s.cleaning_fee),
        amenities: Set(encode_list(&s.features.amenities)),
        lighting: Set(encode_list(&s.features.lighting)),
        equipment: Set(encode_list(&s.features.equipment)),
        furniture: Set(encode_list(&s.features.furniture)),
        instant_book: Set(s.instant_book),
        same_day_booking: Set(s.same_day_booking),
        turnaround_time: Set(s.turnaround_time),
        rules: Set(encode_list(&s.rules)),
        allowed_activities: Set(encode_list(&s.allowed_activities)),
        parking: Set(s.parking.clone()),
        accessibility: Set(s.accessibility),
        wifi_available: Set(s.wifi_available),
        kitchen_available: Set(s.kitchen_available),
        outdoor_space: Set(s.outdoor_space),
        created_at: Set(s.created_at),
        updated_at: Set(s.updated_at),
    }
}

/// Scalar criteria, plus exclusion of spaces booked during the window.
fn filter_condition(filter: &SpaceFilter) -> Condition {
    let mut cond = Condition::all();
    if let Some(host_id) = &filter.host_id {
        cond = cond.add(space::Column::HostId.eq(host_id.as_str()));
    }
    if let Some(category) = filter.category {
        cond = cond.add(space::Column::Category.eq(category.as_str()));
    }
    if let Some(rooms) = filter.min_room_count {
        cond = cond.add(space::Column::RoomCount.gte(rooms));
    }
    if let Some(guests) = filter.min_capacity {
        cond = cond.add(space::Column::Capacity.gte(guests));
    }
    if let Some(bathrooms) = filter.min_bathroom_count {
        cond = cond.add(space::Column::BathroomCount.gte(bathrooms));
    }
    if let Some(location) = &filter.location_value {
        cond = cond.add(space::Column::LocationValue.eq(location.as_str()));
    }
    if let Some(instant) = filter.instant_book {
        cond = cond.add(space::Column::InstantBook.eq(instant));
    }
    if let Some(same_day) = filter.same_day_booking {
        cond = cond.add(space::Column::SameDayBooking.eq(same_day));
    }
    if let Some(min) = filter.min_hourly_rate {
        cond = cond.add(space::Column::HourlyRate.gte(min));
    }
    if let Some(max) = filter.max_hourly_rate {
        cond = cond.add(space::Column::HourlyRate.lte(max));
    }
    if let Some(parking) = &filter.parking {
        cond = cond.add(space::Column::Parking.eq(parking.as_str()));
    }
    if let Some(flag) = filter.accessibility {
        cond = cond.add(space::Column::Accessibility.eq(flag));
    }
    if let Some(flag) = filter.wifi_available {
        cond = cond.add(space::Column::WifiAvailable.eq(flag));
    }
    if let Some(flag) = filter.kitchen_available {
        cond = cond.add(space::Column::KitchenAvailable.eq(flag));
    }
    if let Some(flag) = filter.outdoor_space {
        cond = cond.add(space::Column::OutdoorSpace.eq(flag));
    }
    if let Some(slot) = &filter.available_during {
        let booked = reservation::Entity::find()
            .select_only()
            .column(reservation::Column::SpaceId)
            .filter(holds_slot(slot))
            .into_query();
        cond = cond.add(space::Column::Id.not_in_subquery(booked));
    }
    cond
}

fn has_feature_criteria(filter: &SpaceFilter) -> bool {
    let f = &filter.features;
    !(f.amenities.is_empty() && f.lighting.is_empty() && f.equipment.is_empty() && f.furniture.is_empty())
}

// ── SpaceRepository impl ────────────────────────────────────────

#[async_trait]
impl SpaceRepository for SeaOrmSpaceRepository {
    async fn save(&self, s: Space) -> DomainResult<Space> {
        debug!(space_id = %s.id, host_id = %s.host_id, "Saving space");
        let inserted = domain_to_active(&s).insert(&self.db).await?;
        model_to_domain(inserted)
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Space>> {
        let model = space::Entity::find_by_id(id.to_string()).one(&self.db).await?;
        model.map(model_to_domain).transpose()
    }

    async fn search(
        &self,
        filter: &SpaceFilter,
        page: PaginationParams,
    ) -> DomainResult<PaginatedResult<Space>> {
        let query = space::Entity::find()
            .filter(filter_condition(filter))
            .order_by_desc(space::Column::CreatedAt)
            .order_by_desc(space::Column::Id);

        if !has_feature_criteria(filter) {
            let paginator = query.paginate(&self.db, page.limit);
            let total = paginator.num_items().await?;
            let models = paginator.fetch_page(page.page - 1).await?;
            let spaces = models
                .into_iter()
                .map(model_to_domain)
                .collect::<DomainResult<Vec<_>>>()?;
            return Ok(PaginatedResult::new(spaces, total, page));
        }

        // List-valued criteria are matched after decoding the JSON columns.
        let mut matching = Vec::new();
        for model in query.all(&self.db).await? {
            let space = model_to_domain(model)?;
            if filter.matches_features(&space) {
                matching.push(space);
            }
        }
        Ok(PaginatedResult::from_vec(matching, page))
    }
}
