//! HTTP request handlers.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Extension, Json,
};

use crate::api::types::*;
use crate::auth::{Caller, Role};
use crate::domain::{AnalyticsSummary, Driver, NewShipment, Shipment, ShipmentPatch, Vehicle};
use crate::engine::{ShipmentPage, ShipmentQuery};
use crate::error::{ShipError, ShipResult};
use crate::AppState;

/// Unwrap a JSON body, reporting a malformed one as a bad request.
///
/// Write handlers call this only after the admin check.
fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> ShipResult<T> {
    payload
        .map(|Json(body)| body)
        .map_err(|e| ShipError::BadRequest(e.body_text()))
}

/// Unwrap query-string parameters, reporting malformed ones as a bad request.
fn query_params<T>(params: Result<Query<T>, QueryRejection>) -> ShipResult<T> {
    params
        .map(|Query(query)| query)
        .map_err(|e| ShipError::BadRequest(e.body_text()))
}

// ==================== Shipments ====================

/// List shipments with filtering, search, sorting and pagination.
///
/// GET /v1/shipments
#[utoipa::path(
    get,
    path = "/v1/shipments",
    params(
        ("status" = Option<String>, Query, description = "Pending, In Transit, Delivered or All Shipments"),
        ("search" = Option<String>, Query, description = "Case-insensitive match on name, id, class or cargo"),
        ("sortBy" = Option<String>, Query, description = "<field>_<ASC|DESC>, e.g. attendance_ASC"),
        ("offset" = Option<usize>, Query, description = "Records to skip"),
        ("limit" = Option<usize>, Query, description = "Maximum records")
    ),
    responses(
        (status = 200, description = "Page of shipments", body = ShipmentPage),
        (status = 400, description = "Invalid query")
    ),
    tag = "shipments"
)]
pub async fn list_shipments(
    State(state): State<AppState>,
    query: Result<Query<ShipmentQuery>, QueryRejection>,
) -> ShipResult<Json<ShipmentPage>> {
    let query = query_params(query)?;
    let page = state.store.query(&query).await;

    tracing::debug!(
        status = ?query.status,
        search = ?query.search,
        sort_by = ?query.sort_by,
        total_count = page.total_count,
        returned = page.shipments.len(),
        "Shipments listed"
    );

    Ok(Json(page))
}

/// Get a single shipment.
///
/// GET /v1/shipments/{id}
#[utoipa::path(
    get,
    path = "/v1/shipments/{id}",
    params(
        ("id" = String, Path, description = "Shipment ID")
    ),
    responses(
        (status = 200, description = "Shipment", body = Shipment),
        (status = 404, description = "Shipment not found")
    ),
    tag = "shipments"
)]
pub async fn get_shipment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ShipResult<Json<Shipment>> {
    state
        .store
        .get(&id)
        .await
        .map(Json)
        .ok_or_else(|| ShipError::NotFound(format!("Shipment {} not found", id)))
}

/// Create a shipment. Admin only.
///
/// POST /v1/shipments
#[utoipa::path(
    post,
    path = "/v1/shipments",
    request_body = NewShipment,
    responses(
        (status = 201, description = "Shipment created", body = Shipment),
        (status = 400, description = "Invalid request"),
        (status = 403, description = "Caller is not an admin")
    ),
    security(("bearer_auth" = [])),
    tag = "shipments"
)]
pub async fn create_shipment(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    payload: Result<Json<NewShipment>, JsonRejection>,
) -> ShipResult<(StatusCode, Json<Shipment>)> {
    caller.require_admin()?;
    let input = json_body(payload)?;

    if input.name.trim().is_empty() {
        return Err(ShipError::BadRequest(
            "Shipment name is required".to_string(),
        ));
    }

    let shipment = state.store.create(input).await;

    tracing::info!(
        shipment_id = %shipment.id,
        name = %shipment.name,
        class = %shipment.class,
        "Shipment created"
    );

    Ok((StatusCode::CREATED, Json(shipment)))
}

/// Update fields of a shipment. Admin only.
///
/// PATCH /v1/shipments/{id}
#[utoipa::path(
    patch,
    path = "/v1/shipments/{id}",
    params(
        ("id" = String, Path, description = "Shipment ID")
    ),
    request_body = ShipmentPatch,
    responses(
        (status = 200, description = "Shipment updated", body = Shipment),
        (status = 400, description = "Invalid request"),
        (status = 403, description = "Caller is not an admin"),
        (status = 404, description = "Shipment not found")
    ),
    security(("bearer_auth" = [])),
    tag = "shipments"
)]
pub async fn update_shipment(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Extension(caller): Extension<Caller>,
    payload: Result<Json<ShipmentPatch>, JsonRejection>,
) -> ShipResult<Json<Shipment>> {
    caller.require_admin()?;
    let patch = json_body(payload)?;

    if patch.name.as_deref().is_some_and(|name| name.trim().is_empty()) {
        return Err(ShipError::BadRequest(
            "Shipment name cannot be blank".to_string(),
        ));
    }

    let shipment = state.store.update(&id, patch).await?;

    tracing::info!(
        shipment_id = %shipment.id,
        status = %shipment.status(),
        "Shipment updated"
    );

    Ok(Json(shipment))
}

/// Delete a shipment. Admin only.
///
/// An unknown id is not an error; the response reports `deleted: false`.
///
/// DELETE /v1/shipments/{id}
#[utoipa::path(
    delete,
    path = "/v1/shipments/{id}",
    params(
        ("id" = String, Path, description = "Shipment ID")
    ),
    responses(
        (status = 200, description = "Deletion outcome", body = DeleteShipmentResponse),
        (status = 403, description = "Caller is not an admin")
    ),
    security(("bearer_auth" = [])),
    tag = "shipments"
)]
pub async fn delete_shipment(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Extension(caller): Extension<Caller>,
) -> ShipResult<Json<DeleteShipmentResponse>> {
    caller.require_admin()?;

    let deleted = state.store.delete(&id).await;

    tracing::info!(shipment_id = %id, deleted, "Shipment delete requested");

    Ok(Json(DeleteShipmentResponse { deleted }))
}

// ==================== Derived Views ====================

/// Analytics summary of all shipments.
///
/// GET /v1/analytics
#[utoipa::path(
    get,
    path = "/v1/analytics",
    responses(
        (status = 200, description = "Analytics summary", body = AnalyticsSummary)
    ),
    tag = "views"
)]
pub async fn get_analytics(State(state): State<AppState>) -> Json<AnalyticsSummary> {
    Json(state.store.analytics().await)
}

/// Driver roster derived from shipments.
///
/// GET /v1/drivers
#[utoipa::path(
    get,
    path = "/v1/drivers",
    params(
        ("search" = Option<String>, Query, description = "Match on name, id or email")
    ),
    responses(
        (status = 200, description = "Drivers", body = [Driver]),
        (status = 400, description = "Invalid query")
    ),
    tag = "views"
)]
pub async fn list_drivers(
    State(state): State<AppState>,
    query: Result<Query<RosterQuery>, QueryRejection>,
) -> ShipResult<Json<Vec<Driver>>> {
    let query = query_params(query)?;
    Ok(Json(state.store.drivers(query.search.as_deref()).await))
}

/// Vehicle fleet derived from shipments.
///
/// GET /v1/vehicles
#[utoipa::path(
    get,
    path = "/v1/vehicles",
    params(
        ("search" = Option<String>, Query, description = "Match on model, id or type")
    ),
    responses(
        (status = 200, description = "Vehicles", body = [Vehicle]),
        (status = 400, description = "Invalid query")
    ),
    tag = "views"
)]
pub async fn list_vehicles(
    State(state): State<AppState>,
    query: Result<Query<RosterQuery>, QueryRejection>,
) -> ShipResult<Json<Vec<Vehicle>>> {
    let query = query_params(query)?;
    Ok(Json(state.store.vehicles(query.search.as_deref()).await))
}

/// Health check endpoint.
///
/// GET /v1/health
#[utoipa::path(
    get,
    path = "/v1/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    ),
    tag = "health"
)]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        shipments: state.store.count().await,
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

// ==================== Authentication Endpoints ====================

/// Obtain a role token.
///
/// POST /v1/auth/login
#[utoipa::path(
    post,
    path = "/v1/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Token issued", body = LoginResponse),
        (status = 400, description = "Unknown role or malformed body")
    ),
    tag = "auth"
)]
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> ShipResult<Json<LoginResponse>> {
    let request = json_body(payload)?;
    let role = request
        .role
        .parse::<Role>()
        .ok()
        .filter(Role::can_login)
        .ok_or_else(|| {
            tracing::warn!(role = %request.role, "Login with unsupported role");
            ShipError::BadRequest(format!(
                "Invalid role '{}'. Must be 'ADMIN' or 'EMPLOYEE'",
                request.role
            ))
        })?;

    let token = state.jwt_manager.generate_token(role)?;

    tracing::info!(role = %role, "Token issued");

    Ok(Json(LoginResponse {
        token,
        role,
        expires_in: state.jwt_manager.expires_in_secs(),
    }))
}

/// Get the role the current request resolved to.
///
/// GET /v1/auth/me
#[utoipa::path(
    get,
    path = "/v1/auth/me",
    responses(
        (status = 200, description = "Current caller", body = CallerInfo)
    ),
    security(("bearer_auth" = [])),
    tag = "auth"
)]
pub async fn current_caller(Extension(caller): Extension<Caller>) -> Json<CallerInfo> {
    Json(CallerInfo { role: caller.role })
}
