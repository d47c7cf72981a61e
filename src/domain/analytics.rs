//! Aggregate analytics over the shipment collection.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::Shipment;

/// Shipment counts per derived status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatusCounts {
    pub pending: usize,
    pub in_transit: usize,
    pub delivered: usize,
}

/// Dashboard summary of the whole collection.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsSummary {
    pub total_shipments: usize,
    pub status_counts: StatusCounts,
    /// Shipment count per freight class, ordered by class name.
    pub class_counts: BTreeMap<String, usize>,
    /// Mean progress percent; zero for an empty collection.
    pub average_progress: f64,
    /// Highest-progress shipments, best first.
    pub top_performers: Vec<Shipment>,
    /// Shipments that have started but are below the at-risk threshold.
    pub at_risk: Vec<Shipment>,
}
