//! Reservation HTTP handlers

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::{Extension, Json};

use super::dto::*;
use crate::application::BookingService;
use crate::domain::{ReservationFilter, ReservationStatus};
use crate::interfaces::http::common::{
    bad_request, domain_error, ApiError, ApiResponse, PaginatedResponse, ValidatedJson,
};
use crate::interfaces::http::middleware::AuthenticatedUser;
use crate::shared::PaginationParams;

/// Application state for reservation handlers.
#[derive(Clone)]
pub struct ReservationAppState {
    pub booking: Arc<BookingService>,
}

#[utoipa::path(
    post,
    path = "/api/v1/reservations",
    tag = "Reservations",
    security(("bearer_auth" = [])),
    request_body = CreateReservationRequest,
    responses(
        (status = 201, description = "Reservation created", body = ApiResponse<ReservationDto>),
        (status = 400, description = "Invalid interval or booking too short"),
        (status = 404, description = "Space not found"),
        (status = 409, description = "Time slot is already booked"),
        (status = 422, description = "Validation error")
    )
)]
pub async fn create_reservation(
    State(state): State<ReservationAppState>,
    Extension(user): Extension<AuthenticatedUser>,
    ValidatedJson(request): ValidatedJson<CreateReservationRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ReservationDto>>), ApiError> {
    let reservation = state
        .booking
        .create_reservation(&user.user_id, request.into())
        .await
        .map_err(domain_error)?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(ReservationDto::from(reservation))),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/reservations",
    tag = "Reservations",
    security(("bearer_auth" = [])),
    params(ListReservationsParams),
    responses(
        (status = 200, description = "Reservations, newest first", body = ApiResponse<PaginatedResponse<ReservationDto>>),
        (status = 403, description = "Filter names another user")
    )
)]
pub async fn list_reservations(
    State(state): State<ReservationAppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Query(params): Query<ListReservationsParams>,
) -> Result<Json<ApiResponse<PaginatedResponse<ReservationDto>>>, ApiError> {
    let status = match params.status.as_deref() {
        Some(raw) => Some(
            ReservationStatus::parse(raw)
                .ok_or_else(|| bad_request(format!("Unknown status '{}'", raw)))?,
        ),
        None => None,
    };

    let filter = ReservationFilter {
        space_id: params.space_id,
        user_id: params.user_id,
        host_id: params.host_id,
        status,
    };
    let page = PaginationParams::new(params.page, params.limit);

    let result = state
        .booking
        .list_reservations(&user.user_id, filter, page)
        .await
        .map_err(domain_error)?;

    Ok(Json(ApiResponse::success(PaginatedResponse::from_result(
        result,
        ReservationDto::from,
    ))))
}

#[utoipa::path(
    get,
    path = "/api/v1/reservations/{id}",
    tag = "Reservations",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Reservation ID")),
    responses(
        (status = 200, description = "Reservation details", body = ApiResponse<ReservationDto>),
        (status = 403, description = "Neither guest nor host"),
        (status = 404, description = "Reservation not found")
    )
)]
pub async fn get_reservation(
    State(state): State<ReservationAppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<ReservationDto>>, ApiError> {
    let reservation = state
        .booking
        .get_reservation(&id, &user.user_id)
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(ReservationDto::from(reservation))))
}

#[utoipa::path(
    post,
    path = "/api/v1/reservations/{id}/confirm",
    tag = "Reservations",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Reservation ID")),
    responses(
        (status = 200, description = "Reservation confirmed", body = ApiResponse<ReservationDto>),
        (status = 400, description = "Reservation is not pending"),
        (status = 403, description = "Caller does not host the space"),
        (status = 404, description = "Reservation not found")
    )
)]
pub async fn confirm_reservation(
    State(state): State<ReservationAppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<ReservationDto>>, ApiError> {
    let reservation = state
        .booking
        .confirm_reservation(&id, &user.user_id)
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(ReservationDto::from(reservation))))
}

#[utoipa::path(
    post,
    path = "/api/v1/reservations/{id}/cancel",
    tag = "Reservations",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Reservation ID")),
    responses(
        (status = 200, description = "Reservation cancelled", body = ApiResponse<ReservationDto>),
        (status = 400, description = "Reservation already completed or cancelled"),
        (status = 403, description = "Neither guest nor host"),
        (status = 404, description = "Reservation not found")
    )
)]
pub async fn cancel_reservation(
    State(state): State<ReservationAppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<ReservationDto>>, ApiError> {
    let reservation = state
        .booking
        .cancel_reservation(&id, &user.user_id)
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(ReservationDto::from(reservation))))
}
