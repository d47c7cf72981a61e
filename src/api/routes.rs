//! Route definitions for the API.

use axum::{
    http::HeaderValue,
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::api::handlers;
use crate::auth::resolve_caller;
use crate::AppState;

/// Security scheme modifier for OpenAPI.
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
                        .build(),
                ),
            );
        }
    }
}

/// OpenAPI documentation.
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::list_shipments,
        handlers::get_shipment,
        handlers::create_shipment,
        handlers::update_shipment,
        handlers::delete_shipment,
        handlers::get_analytics,
        handlers::list_drivers,
        handlers::list_vehicles,
        handlers::health_check,
        handlers::login,
        handlers::current_caller,
    ),
    components(schemas(
        crate::api::types::DeleteShipmentResponse,
        crate::api::types::HealthResponse,
        crate::api::types::LoginRequest,
        crate::api::types::LoginResponse,
        crate::api::types::CallerInfo,
        crate::auth::Role,
        crate::engine::ShipmentPage,
        crate::domain::Shipment,
        crate::domain::ShipmentStatus,
        crate::domain::NewShipment,
        crate::domain::ShipmentPatch,
        crate::domain::AnalyticsSummary,
        crate::domain::StatusCounts,
        crate::domain::Driver,
        crate::domain::DriverStatus,
        crate::domain::Vehicle,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "shipments", description = "Shipment listing and management"),
        (name = "views", description = "Analytics, drivers and vehicles derived from shipments"),
        (name = "auth", description = "Role tokens"),
        (name = "health", description = "Health and status endpoints")
    ),
    info(
        title = "UltraShip Core API",
        version = "0.1.0",
        description = "Logistics shipment service over an in-memory fleet",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

/// CORS for the dashboard. An empty origin list allows any origin.
fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let cors = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if allowed_origins.is_empty() {
        return cors.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(origin = %origin, error = %e, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    cors.allow_origin(AllowOrigin::list(origins))
}

/// Build the API router.
///
/// Every route resolves the caller first; write handlers enforce the admin
/// role themselves.
pub fn build_router(state: AppState, allowed_origins: &[String]) -> Router {
    let jwt_manager = state.jwt_manager.clone();

    Router::new()
        // Shipments
        .route(
            "/v1/shipments",
            get(handlers::list_shipments).post(handlers::create_shipment),
        )
        .route(
            "/v1/shipments/:id",
            get(handlers::get_shipment)
                .patch(handlers::update_shipment)
                .delete(handlers::delete_shipment),
        )
        // Derived views
        .route("/v1/analytics", get(handlers::get_analytics))
        .route("/v1/drivers", get(handlers::list_drivers))
        .route("/v1/vehicles", get(handlers::list_vehicles))
        // Auth
        .route("/v1/auth/login", post(handlers::login))
        .route("/v1/auth/me", get(handlers::current_caller))
        // Health
        .route("/v1/health", get(handlers::health_check))
        .layer(middleware::from_fn_with_state(jwt_manager, resolve_caller))
        .with_state(state)
        // OpenAPI docs
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(allowed_origins))
}
