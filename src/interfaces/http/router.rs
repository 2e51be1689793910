//! API Router with Swagger UI

use std::sync::Arc;
use std::time::Instant;

use axum::{
    middleware,
    routing::{get, patch, post},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::application::{AvailabilityService, BookingService, SpaceService};
use crate::domain::RepositoryProvider;
use crate::infrastructure::crypto::jwt::JwtConfig;
use crate::interfaces::http::common::{ApiResponse, EmptyData};
use crate::interfaces::http::middleware::{auth_middleware, AuthState};
use crate::interfaces::http::modules::availability::{self, AvailabilityAppState};
use crate::interfaces::http::modules::health::{self, HealthState};
use crate::interfaces::http::modules::metrics::{
    http_metrics_middleware, prometheus_metrics, MetricsState,
};
use crate::interfaces::http::modules::request_id::request_id_middleware;
use crate::interfaces::http::modules::reservations::{self, ReservationAppState};
use crate::interfaces::http::modules::spaces::{self, SpaceAppState};

/// Everything the HTTP layer needs from the running service.
#[derive(Clone)]
pub struct ApiContext {
    pub db: DatabaseConnection,
    pub repos: Arc<dyn RepositoryProvider>,
    /// Shared with the completion task so both see the same per-space locks
    pub booking: Arc<BookingService>,
    pub jwt_config: JwtConfig,
    /// `/metrics` is only mounted when a recorder is installed
    pub metrics: Option<PrometheusHandle>,
}

/// Security scheme modifier for OpenAPI
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT issued by the identity provider"))
                        .build(),
                ),
            );
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        spaces::handlers::search_spaces,
        spaces::handlers::get_space,
        spaces::handlers::create_space,
        availability::handlers::list_space_availability,
        availability::handlers::create_availability,
        availability::handlers::update_availability,
        availability::handlers::delete_availability,
        reservations::handlers::create_reservation,
        reservations::handlers::list_reservations,
        reservations::handlers::get_reservation,
        reservations::handlers::confirm_reservation,
        reservations::handlers::cancel_reservation,
    ),
    components(
        schemas(
            ApiResponse<String>,
            EmptyData,
            health::HealthResponse,
            health::ComponentHealth,
            spaces::dto::SpaceDto,
            spaces::dto::CreateSpaceRequest,
            availability::dto::AvailabilityDto,
            availability::dto::CreateAvailabilityRequest,
            availability::dto::UpdateAvailabilityRequest,
            reservations::dto::ReservationDto,
            reservations::dto::CreateReservationRequest,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Liveness and database reachability"),
        (name = "Spaces", description = "Listing and searching event spaces, including availability-window search"),
        (name = "Availability", description = "Weekly opening hours and blocked dates per space"),
        (name = "Reservations", description = "Hourly bookings: create, list, confirm and cancel"),
    ),
    info(
        title = "Event Space Booking API",
        version = "1.0.0",
        description = "REST API for listing event spaces and booking them by the hour",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

/// Create the API router with all routes
pub fn create_api_router(ctx: ApiContext) -> Router {
    let auth_state = AuthState {
        jwt_config: ctx.jwt_config.clone(),
    };

    let space_state = SpaceAppState {
        spaces: Arc::new(SpaceService::new(ctx.repos.clone())),
    };
    let availability_state = AvailabilityAppState {
        availability: Arc::new(AvailabilityService::new(ctx.repos.clone())),
    };
    let reservation_state = ReservationAppState {
        booking: ctx.booking.clone(),
    };

    // Space routes: browsing is public, listing requires a token
    let public_space_routes = Router::new()
        .route("/", get(spaces::search_spaces))
        .route("/{id}", get(spaces::get_space))
        .with_state(space_state.clone());

    let protected_space_routes = Router::new()
        .route("/", post(spaces::create_space))
        .route_layer(middleware::from_fn_with_state(
            auth_state.clone(),
            auth_middleware,
        ))
        .with_state(space_state);

    let space_schedule_routes = Router::new()
        .route("/{id}/availability", get(availability::list_space_availability))
        .with_state(availability_state.clone());

    let space_routes = public_space_routes
        .merge(protected_space_routes)
        .merge(space_schedule_routes);

    // Availability routes (protected, host only)
    let availability_routes = Router::new()
        .route("/", post(availability::create_availability))
        .route(
            "/{id}",
            patch(availability::update_availability).delete(availability::delete_availability),
        )
        .route_layer(middleware::from_fn_with_state(
            auth_state.clone(),
            auth_middleware,
        ))
        .with_state(availability_state);

    // Reservation routes (protected)
    let reservation_routes = Router::new()
        .route(
            "/",
            get(reservations::list_reservations).post(reservations::create_reservation),
        )
        .route("/{id}", get(reservations::get_reservation))
        .route("/{id}/confirm", post(reservations::confirm_reservation))
        .route("/{id}/cancel", post(reservations::cancel_reservation))
        .route_layer(middleware::from_fn_with_state(
            auth_state,
            auth_middleware,
        ))
        .with_state(reservation_state);

    let health_routes = Router::new()
        .route("/health", get(health::health_check))
        .with_state(HealthState {
            db: ctx.db.clone(),
            started_at: Arc::new(Instant::now()),
        });

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let mut router = Router::new()
        .merge(swagger_routes)
        .merge(health_routes)
        .nest("/api/v1/spaces", space_routes)
        .nest("/api/v1/availability", availability_routes)
        .nest("/api/v1/reservations", reservation_routes);

    if let Some(handle) = ctx.metrics {
        router = router.merge(
            Router::new()
                .route("/metrics", get(prometheus_metrics))
                .with_state(MetricsState { handle }),
        );
    }

    router
        .layer(middleware::from_fn(http_metrics_middleware))
        // Outermost of the app layers so its span covers auth and handlers
        .layer(middleware::from_fn(request_id_middleware))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::infrastructure::crypto::jwt::create_token;
    use crate::infrastructure::database::test_database;
    use crate::infrastructure::SeaOrmRepositoryProvider;

    fn jwt_config() -> JwtConfig {
        JwtConfig {
            secret: "router-test-secret".to_string(),
            issuer: "router-tests".to_string(),
            expiration_hours: 1,
        }
    }

    fn token(user_id: &str) -> String {
        create_token(user_id, "user", &jwt_config()).unwrap()
    }

    async fn app() -> Router {
        let db = test_database().await;
        let repos: Arc<dyn RepositoryProvider> =
            Arc::new(SeaOrmRepositoryProvider::new(db.clone()));
        create_api_router(ApiContext {
            db,
            booking: Arc::new(BookingService::new(repos.clone(), 10)),
            repos,
            jwt_config: jwt_config(),
            metrics: None,
        })
    }

    async fn send(
        app: &Router,
        method: &str,
        uri: &str,
        user: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(user) = user {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token(user)));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    fn studio() -> Value {
        json!({
            "title": "Sunlit loft",
            "description": "Open plan loft with north light",
            "image_src": "https://img.example/loft.jpg",
            "category": "photoshoot",
            "capacity": 25,
            "location_value": "NYC",
            "hourly_rate": 100,
            "minimum_hours": 1,
            "cleaning_fee": 30,
            "amenities": ["wifi", "sound"]
        })
    }

    async fn list_space(app: &Router, host: &str) -> String {
        let (status, body) = send(app, "POST", "/api/v1/spaces", Some(host), Some(studio())).await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["data"]["id"].as_str().unwrap().to_string()
    }

    fn booking(space_id: &str, start: &str, end: &str) -> Value {
        json!({
            "space_id": space_id,
            "start_time": start,
            "end_time": end,
            "event_type": "photoshoot",
            "guest_count": 8
        })
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let app = app().await;
        let (status, body) = send(&app, "GET", "/health", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["database"]["status"], "ok");
    }

    #[tokio::test]
    async fn protected_routes_require_a_token() {
        let app = app().await;

        let (status, body) = send(&app, "GET", "/api/v1/reservations", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["success"], false);

        let (status, _) = send(&app, "POST", "/api/v1/spaces", None, Some(studio())).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let request = Request::builder()
            .uri("/api/v1/reservations")
            .header(header::AUTHORIZATION, "Bearer not-a-jwt")
            .body(Body::empty())
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn browsing_is_public() {
        let app = app().await;
        let id = list_space(&app, "host-1").await;

        let (status, body) = send(&app, "GET", "/api/v1/spaces", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["total"], 1);

        let (status, body) = send(&app, "GET", &format!("/api/v1/spaces/{id}"), None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["host_id"], "host-1");
        assert_eq!(body["data"]["amenities"], json!(["wifi", "sound"]));

        let (status, _) = send(&app, "GET", "/api/v1/spaces/missing", None, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn overlapping_booking_is_rejected_with_409() {
        let app = app().await;
        let space = list_space(&app, "host-1").await;

        let (status, body) = send(
            &app,
            "POST",
            "/api/v1/reservations",
            Some("guest-1"),
            Some(booking(&space, "2026-06-01T10:00:00Z", "2026-06-01T12:00:00Z")),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        assert_eq!(body["data"]["status"], "pending");
        assert_eq!(body["data"]["total_price"], 250);

        let (status, body) = send(
            &app,
            "POST",
            "/api/v1/reservations",
            Some("guest-2"),
            Some(booking(&space, "2026-06-01T11:00:00Z", "2026-06-01T13:00:00Z")),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "Time slot is already booked");

        // Touching endpoints do not overlap
        let (status, _) = send(
            &app,
            "POST",
            "/api/v1/reservations",
            Some("guest-2"),
            Some(booking(&space, "2026-06-01T12:00:00Z", "2026-06-01T14:00:00Z")),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    #[tokio::test]
    async fn window_search_hides_booked_spaces() {
        let app = app().await;
        let booked = list_space(&app, "host-1").await;
        let free = list_space(&app, "host-2").await;

        let (status, body) = send(
            &app,
            "POST",
            "/api/v1/reservations",
            Some("guest-1"),
            Some(booking(&booked, "2026-06-01T10:00:00Z", "2026-06-01T12:00:00Z")),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let reservation_id = body["data"]["id"].as_str().unwrap().to_string();

        let (status, body) = send(
            &app,
            "GET",
            "/api/v1/spaces?start_time=2026-06-01T11:00:00Z&end_time=2026-06-01T13:00:00Z",
            None,
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let ids: Vec<&str> = body["data"]["items"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|s| s["id"].as_str())
            .collect();
        assert_eq!(ids, vec![free.as_str()]);

        let (_, body) = send(
            &app,
            "GET",
            "/api/v1/spaces?start_time=2026-06-01T12:00:00Z&end_time=2026-06-01T13:00:00Z",
            None,
            None,
        )
        .await;
        assert_eq!(body["data"]["total"], 2);

        // A cancelled booking no longer hides the space
        let (status, _) = send(
            &app,
            "POST",
            &format!("/api/v1/reservations/{reservation_id}/cancel"),
            Some("guest-1"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let (_, body) = send(
            &app,
            "GET",
            "/api/v1/spaces?start_time=2026-06-01T11:00:00Z&end_time=2026-06-01T13:00:00Z",
            None,
            None,
        )
        .await;
        assert_eq!(body["data"]["total"], 2);
    }

    #[tokio::test]
    async fn malformed_windows_are_400() {
        let app = app().await;
        let space = list_space(&app, "host-1").await;

        let (status, _) = send(
            &app,
            "POST",
            "/api/v1/reservations",
            Some("guest-1"),
            Some(booking(&space, "2026-06-01T12:00:00Z", "2026-06-01T12:00:00Z")),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(
            &app,
            "GET",
            "/api/v1/spaces?start_time=2026-06-01T12:00:00Z",
            None,
            None,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(
            &app,
            "GET",
            "/api/v1/spaces?start_time=2026-06-01T13:00:00Z&end_time=2026-06-01T12:00:00Z",
            None,
            None,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn invalid_payload_is_422() {
        let app = app().await;
        let space = list_space(&app, "host-1").await;

        let mut body = booking(&space, "2026-06-01T10:00:00Z", "2026-06-01T12:00:00Z");
        body["guest_count"] = json!(0);
        let (status, _) = send(&app, "POST", "/api/v1/reservations", Some("guest-1"), Some(body)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn host_confirms_and_guest_cancels() {
        let app = app().await;
        let space = list_space(&app, "host-1").await;

        let (_, body) = send(
            &app,
            "POST",
            "/api/v1/reservations",
            Some("guest-1"),
            Some(booking(&space, "2026-06-01T10:00:00Z", "2026-06-01T12:00:00Z")),
        )
        .await;
        let id = body["data"]["id"].as_str().unwrap().to_string();

        let (status, _) = send(
            &app,
            "POST",
            &format!("/api/v1/reservations/{id}/confirm"),
            Some("guest-1"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, body) = send(
            &app,
            "POST",
            &format!("/api/v1/reservations/{id}/confirm"),
            Some("host-1"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["status"], "confirmed");

        let (status, _) = send(
            &app,
            "GET",
            &format!("/api/v1/reservations/{id}"),
            Some("stranger"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, body) = send(
            &app,
            "POST",
            &format!("/api/v1/reservations/{id}/cancel"),
            Some("guest-1"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["status"], "cancelled");

        // The slot is free again
        let (status, _) = send(
            &app,
            "POST",
            "/api/v1/reservations",
            Some("guest-2"),
            Some(booking(&space, "2026-06-01T10:00:00Z", "2026-06-01T12:00:00Z")),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, body) = send(&app, "GET", "/api/v1/reservations", Some("guest-1"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["total"], 1);
    }

    #[tokio::test]
    async fn only_the_host_edits_the_schedule() {
        let app = app().await;
        let space = list_space(&app, "host-1").await;
        let rule = json!({
            "space_id": space,
            "day_of_week": 2,
            "start_time": "08:00",
            "end_time": "18:00"
        });

        let (status, _) = send(
            &app,
            "POST",
            "/api/v1/availability",
            Some("guest-1"),
            Some(rule.clone()),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, body) = send(&app, "POST", "/api/v1/availability", Some("host-1"), Some(rule)).await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        let rule_id = body["data"]["id"].as_str().unwrap().to_string();

        let (status, body) = send(
            &app,
            "PATCH",
            &format!("/api/v1/availability/{rule_id}"),
            Some("host-1"),
            Some(json!({ "is_blocked": true })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["is_blocked"], true);

        let (status, body) = send(
            &app,
            "GET",
            &format!("/api/v1/spaces/{space}/availability"),
            None,
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"][0]["start_time"], "08:00");

        let (status, _) = send(
            &app,
            "DELETE",
            &format!("/api/v1/availability/{rule_id}"),
            Some("host-1"),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }
}
