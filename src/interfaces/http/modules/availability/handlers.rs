//! Availability HTTP handlers

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};

use super::dto::*;
use crate::application::AvailabilityService;
use crate::interfaces::http::common::{domain_error, ApiError, ApiResponse, EmptyData, ValidatedJson};
use crate::interfaces::http::middleware::AuthenticatedUser;

#[derive(Clone)]
pub struct AvailabilityAppState {
    pub availability: Arc<AvailabilityService>,
}

#[utoipa::path(
    get,
    path = "/api/v1/spaces/{id}/availability",
    tag = "Availability",
    params(("id" = String, Path, description = "Space ID")),
    responses(
        (status = 200, description = "Schedule ordered by day and start time", body = ApiResponse<Vec<AvailabilityDto>>),
        (status = 404, description = "Space not found")
    )
)]
pub async fn list_space_availability(
    State(state): State<AvailabilityAppState>,
    Path(space_id): Path<String>,
) -> Result<Json<ApiResponse<Vec<AvailabilityDto>>>, ApiError> {
    let rules = state
        .availability
        .list_for_space(&space_id)
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(
        rules.into_iter().map(AvailabilityDto::from).collect(),
    )))
}

#[utoipa::path(
    post,
    path = "/api/v1/availability",
    tag = "Availability",
    security(("bearer_auth" = [])),
    request_body = CreateAvailabilityRequest,
    responses(
        (status = 201, description = "Rule added", body = ApiResponse<AvailabilityDto>),
        (status = 400, description = "Start not before end"),
        (status = 403, description = "Caller does not host the space"),
        (status = 404, description = "Space not found")
    )
)]
pub async fn create_availability(
    State(state): State<AvailabilityAppState>,
    Extension(user): Extension<AuthenticatedUser>,
    ValidatedJson(request): ValidatedJson<CreateAvailabilityRequest>,
) -> Result<(StatusCode, Json<ApiResponse<AvailabilityDto>>), ApiError> {
    let rule = state
        .availability
        .create(&user.user_id, request.into())
        .await
        .map_err(domain_error)?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(AvailabilityDto::from(rule))),
    ))
}

#[utoipa::path(
    patch,
    path = "/api/v1/availability/{id}",
    tag = "Availability",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Availability rule ID")),
    request_body = UpdateAvailabilityRequest,
    responses(
        (status = 200, description = "Rule updated", body = ApiResponse<AvailabilityDto>),
        (status = 403, description = "Caller does not host the space"),
        (status = 404, description = "Rule not found")
    )
)]
pub async fn update_availability(
    State(state): State<AvailabilityAppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateAvailabilityRequest>,
) -> Result<Json<ApiResponse<AvailabilityDto>>, ApiError> {
    let rule = state
        .availability
        .update(&id, &user.user_id, request.into())
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(AvailabilityDto::from(rule))))
}

#[utoipa::path(
    delete,
    path = "/api/v1/availability/{id}",
    tag = "Availability",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Availability rule ID")),
    responses(
        (status = 200, description = "Rule removed", body = ApiResponse<EmptyData>),
        (status = 403, description = "Caller does not host the space"),
        (status = 404, description = "Rule not found")
    )
)]
pub async fn delete_availability(
    State(state): State<AvailabilityAppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<EmptyData>>, ApiError> {
    state
        .availability
        .delete(&id, &user.user_id)
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(EmptyData {})))
}
