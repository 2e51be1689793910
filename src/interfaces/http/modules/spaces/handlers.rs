//! Space HTTP handlers

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::{Extension, Json};

use super::dto::*;
use crate::application::SpaceService;
use crate::domain::{SpaceCategory, SpaceFeatures, SpaceFilter, TimeSlot};
use crate::interfaces::http::common::{
    bad_request, domain_error, ApiError, ApiResponse, PaginatedResponse, ValidatedJson,
};
use crate::interfaces::http::middleware::AuthenticatedUser;
use crate::shared::PaginationParams;

/// Application state for space handlers
#[derive(Clone)]
pub struct SpaceAppState {
    pub spaces: Arc<SpaceService>,
}

fn to_filter(params: &SearchSpacesParams) -> Result<SpaceFilter, ApiError> {
    let category = match params.category.as_deref() {
        Some(raw) => Some(
            SpaceCategory::parse(raw)
                .ok_or_else(|| bad_request(format!("Unknown category '{}'", raw)))?,
        ),
        None => None,
    };

    let available_during = match (params.start_time, params.end_time) {
        (Some(start), Some(end)) => Some(TimeSlot::new(start, end).map_err(domain_error)?),
        (None, None) => None,
        _ => {
            return Err(bad_request(
                "start_time and end_time must be given together",
            ))
        }
    };

    Ok(SpaceFilter {
        host_id: params.host_id.clone(),
        category,
        min_room_count: params.room_count,
        min_capacity: params.guest_count.or(params.capacity),
        min_bathroom_count: params.bathroom_count,
        location_value: params.location_value.clone(),
        features: SpaceFeatures {
            amenities: split_list(&params.amenities),
            lighting: split_list(&params.lighting),
            equipment: split_list(&params.equipment),
            furniture: split_list(&params.furniture),
        },
        instant_book: params.instant_book,
        same_day_booking: params.same_day_booking,
        min_hourly_rate: params.min_hourly_rate,
        max_hourly_rate: params.max_hourly_rate,
        parking: params.parking.clone(),
        accessibility: params.accessibility,
        wifi_available: params.wifi_available,
        kitchen_available: params.kitchen_available,
        outdoor_space: params.outdoor_space,
        available_during,
    })
}

#[utoipa::path(
    get,
    path = "/api/v1/spaces",
    tag = "Spaces",
    params(SearchSpacesParams),
    responses(
        (status = 200, description = "Matching spaces, newest first", body = ApiResponse<PaginatedResponse<SpaceDto>>),
        (status = 400, description = "Malformed filter or availability window")
    )
)]
pub async fn search_spaces(
    State(state): State<SpaceAppState>,
    Query(params): Query<SearchSpacesParams>,
) -> Result<Json<ApiResponse<PaginatedResponse<SpaceDto>>>, ApiError> {
    let filter = to_filter(&params)?;
    let page = PaginationParams::new(params.page, params.limit);

    let result = state
        .spaces
        .search_spaces(&filter, page)
        .await
        .map_err(domain_error)?;

    Ok(Json(ApiResponse::success(PaginatedResponse::from_result(
        result,
        SpaceDto::from,
    ))))
}

#[utoipa::path(
    get,
    path = "/api/v1/spaces/{id}",
    tag = "Spaces",
    params(("id" = String, Path, description = "Space ID")),
    responses(
        (status = 200, description = "Space details", body = ApiResponse<SpaceDto>),
        (status = 404, description = "Space not found")
    )
)]
pub async fn get_space(
    State(state): State<SpaceAppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<SpaceDto>>, ApiError> {
    let space = state.spaces.get_space(&id).await.map_err(domain_error)?;
    Ok(Json(ApiResponse::success(SpaceDto::from(space))))
}

#[utoipa::path(
    post,
    path = "/api/v1/spaces",
    tag = "Spaces",
    security(("bearer_auth" = [])),
    request_body = CreateSpaceRequest,
    responses(
        (status = 201, description = "Space listed", body = ApiResponse<SpaceDto>),
        (status = 401, description = "Not authenticated"),
        (status = 422, description = "Validation error")
    )
)]
pub async fn create_space(
    State(state): State<SpaceAppState>,
    Extension(user): Extension<AuthenticatedUser>,
    ValidatedJson(request): ValidatedJson<CreateSpaceRequest>,
) -> Result<(StatusCode, Json<ApiResponse<SpaceDto>>), ApiError> {
    let space = state
        .spaces
        .create_space(&user.user_id, request.into())
        .await
        .map_err(domain_error)?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(SpaceDto::from(space))),
    ))
}
