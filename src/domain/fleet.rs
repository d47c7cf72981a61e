//! Driver and vehicle views derived from the shipment collection.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Availability of a driver. The derived roster lists every driver as active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum DriverStatus {
    Active,
}

/// A driver aggregated from the shipments sharing a customer prefix.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Driver {
    /// `DRV-NNN`, numbered by the collection position that introduced it.
    pub id: String,
    pub name: String,
    pub email: String,
    /// Freight class of the first shipment seen for this driver.
    pub vehicle_type: String,
    pub status: DriverStatus,
    pub total_shipments: usize,
    pub completed_shipments: usize,
    /// Completed share of total shipments, as a rounded percentage.
    pub performance: u32,
}

impl Driver {
    /// Whether an already-lowercased needle occurs in the name, id or email.
    pub fn matches_search(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self.id.to_lowercase().contains(needle)
            || self.email.to_lowercase().contains(needle)
    }
}

/// A vehicle aggregated per freight class.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    /// `VEH-NNN`, numbered by the collection position that introduced it.
    pub id: String,
    pub model: String,
    #[serde(rename = "type")]
    pub kind: String,
    /// Shipments of this class currently in transit.
    pub current_shipments: usize,
}

impl Vehicle {
    /// Whether an already-lowercased needle occurs in the model, id or type.
    pub fn matches_search(&self, needle: &str) -> bool {
        self.model.to_lowercase().contains(needle)
            || self.id.to_lowercase().contains(needle)
            || self.kind.to_lowercase().contains(needle)
    }
}
