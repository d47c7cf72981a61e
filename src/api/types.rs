//! API request and response types.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::auth::Role;

// ==================== Shipments ====================

/// Response after deleting a shipment.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DeleteShipmentResponse {
    /// Whether a shipment with the id existed and was removed.
    pub deleted: bool,
}

/// Query parameters for the driver and vehicle views.
#[derive(Debug, Default, Deserialize)]
pub struct RosterQuery {
    /// Case-insensitive substring filter.
    #[serde(default)]
    pub search: Option<String>,
}

// ==================== Health ====================

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Service version.
    pub version: String,
    /// Shipments currently held in memory.
    pub shipments: usize,
    /// Timestamp.
    pub timestamp: String,
}

// ==================== Authentication ====================

/// Login request.
#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    /// `ADMIN` or `EMPLOYEE`.
    pub role: String,
}

/// Login response.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    /// JWT token.
    pub token: String,
    /// Role encoded in the token.
    pub role: Role,
    /// Token expiration in seconds.
    pub expires_in: i64,
}

/// The resolved caller.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CallerInfo {
    pub role: Role,
}
