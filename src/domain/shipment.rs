//! Shipment domain types.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::config::ShipmentsConfig;

/// Status label meaning "no status filter".
pub const ALL_SHIPMENTS: &str = "All Shipments";

/// Delivery status derived from shipment progress. Never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum ShipmentStatus {
    /// No progress yet (`attendance == 0`).
    Pending,
    /// Progress strictly between the bounds.
    #[serde(rename = "In Transit")]
    InTransit,
    /// Progress at or above 100.
    Delivered,
}

impl ShipmentStatus {
    /// Derive status from a progress percentage.
    ///
    /// Values that are neither exactly zero nor at least 100 (including
    /// negatives and NaN) count as in transit.
    pub fn from_progress(attendance: f64) -> Self {
        if attendance >= 100.0 {
            ShipmentStatus::Delivered
        } else if attendance == 0.0 {
            ShipmentStatus::Pending
        } else {
            ShipmentStatus::InTransit
        }
    }

    /// Wire label used for filtering and display.
    pub fn label(&self) -> &'static str {
        match self {
            ShipmentStatus::Pending => "Pending",
            ShipmentStatus::InTransit => "In Transit",
            ShipmentStatus::Delivered => "Delivered",
        }
    }
}

impl std::fmt::Display for ShipmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for ShipmentStatus {
    type Err = String;

    /// Labels match exactly; "pending" is not "Pending".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(ShipmentStatus::Pending),
            "In Transit" => Ok(ShipmentStatus::InTransit),
            "Delivered" => Ok(ShipmentStatus::Delivered),
            _ => Err(format!("Invalid shipment status: {}", s)),
        }
    }
}

/// A freight record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Shipment {
    /// Opaque identifier, unique within the collection.
    pub id: String,
    /// Customer label.
    pub name: String,
    /// Days in transit.
    pub age: u32,
    /// Freight category (e.g. "Standard", "Express").
    pub class: String,
    /// Cargo item labels.
    pub subjects: Vec<String>,
    /// Delivery progress percent, conventionally 0..=100.
    pub attendance: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
}

impl Shipment {
    /// Derived delivery status.
    pub fn status(&self) -> ShipmentStatus {
        ShipmentStatus::from_progress(self.attendance)
    }

    /// Whether an already-lowercased needle occurs in the name, id, class or
    /// any cargo item.
    pub fn matches_search(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle)
            || self.id.to_lowercase().contains(needle)
            || self.class.to_lowercase().contains(needle)
            || self
                .subjects
                .iter()
                .any(|subject| subject.to_lowercase().contains(needle))
    }
}

/// Input for creating a shipment.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct NewShipment {
    pub name: String,
    pub age: u32,
    pub class: String,
    /// Cargo items. An empty list is replaced by the configured default item.
    #[serde(default)]
    pub subjects: Vec<String>,
    pub attendance: f64,
    #[serde(default)]
    pub origin: Option<String>,
    #[serde(default)]
    pub destination: Option<String>,
    #[serde(default)]
    pub priority: Option<String>,
}

impl NewShipment {
    /// Build the stored record, filling absent optional fields from defaults.
    pub fn into_shipment(self, id: String, defaults: &ShipmentsConfig) -> Shipment {
        let subjects = if self.subjects.is_empty() {
            vec![defaults.default_cargo.clone()]
        } else {
            self.subjects
        };
        let priority = self
            .priority
            .unwrap_or_else(|| default_priority(&self.class).to_string());

        Shipment {
            id,
            name: self.name,
            age: self.age,
            class: self.class,
            subjects,
            attendance: self.attendance,
            origin: Some(self.origin.unwrap_or_else(|| defaults.default_origin.clone())),
            destination: Some(
                self.destination
                    .unwrap_or_else(|| defaults.default_destination.clone()),
            ),
            priority: Some(priority),
        }
    }
}

/// Express freight ships at high priority, everything else at normal.
fn default_priority(class: &str) -> &'static str {
    if class.eq_ignore_ascii_case("express") {
        "HIGH"
    } else {
        "NORMAL"
    }
}

/// Partial update for a shipment. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct ShipmentPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub class: Option<String>,
    #[serde(default)]
    pub subjects: Option<Vec<String>>,
    #[serde(default)]
    pub attendance: Option<f64>,
    #[serde(default)]
    pub origin: Option<String>,
    #[serde(default)]
    pub destination: Option<String>,
    #[serde(default)]
    pub priority: Option<String>,
}

impl ShipmentPatch {
    /// Shallow-merge the supplied fields over `shipment`.
    ///
    /// An empty cargo list falls back to the default item, as on create.
    pub fn apply(self, shipment: &mut Shipment, defaults: &ShipmentsConfig) {
        if let Some(name) = self.name {
            shipment.name = name;
        }
        if let Some(age) = self.age {
            shipment.age = age;
        }
        if let Some(class) = self.class {
            shipment.class = class;
        }
        if let Some(subjects) = self.subjects {
            shipment.subjects = if subjects.is_empty() {
                vec![defaults.default_cargo.clone()]
            } else {
                subjects
            };
        }
        if let Some(attendance) = self.attendance {
            shipment.attendance = attendance;
        }
        if self.origin.is_some() {
            shipment.origin = self.origin;
        }
        if self.destination.is_some() {
            shipment.destination = self.destination;
        }
        if self.priority.is_some() {
            shipment.priority = self.priority;
        }
    }
}
