//! Read-only views aggregated from the shipment collection.

use std::collections::{BTreeMap, HashMap};

use crate::domain::{
    AnalyticsSummary, Driver, DriverStatus, Shipment, ShipmentStatus, StatusCounts, Vehicle,
};

/// Number of shipments listed as top performers.
const TOP_PERFORMERS: usize = 5;

/// Progress below which a started shipment counts as at risk.
const AT_RISK_BELOW: f64 = 30.0;

/// Summarize the collection for the analytics dashboard.
pub fn analytics(shipments: &[Shipment]) -> AnalyticsSummary {
    let mut status_counts = StatusCounts::default();
    let mut class_counts: BTreeMap<String, usize> = BTreeMap::new();

    for shipment in shipments {
        match shipment.status() {
            ShipmentStatus::Pending => status_counts.pending += 1,
            ShipmentStatus::InTransit => status_counts.in_transit += 1,
            ShipmentStatus::Delivered => status_counts.delivered += 1,
        }
        *class_counts.entry(shipment.class.clone()).or_default() += 1;
    }

    let average_progress = if shipments.is_empty() {
        0.0
    } else {
        shipments.iter().map(|s| s.attendance).sum::<f64>() / shipments.len() as f64
    };

    let mut ranked: Vec<&Shipment> = shipments.iter().collect();
    ranked.sort_by(|a, b| b.attendance.total_cmp(&a.attendance));
    let top_performers = ranked
        .into_iter()
        .take(TOP_PERFORMERS)
        .cloned()
        .collect();

    let at_risk = shipments
        .iter()
        .filter(|s| s.attendance > 0.0 && s.attendance < AT_RISK_BELOW)
        .cloned()
        .collect();

    AnalyticsSummary {
        total_shipments: shipments.len(),
        status_counts,
        class_counts,
        average_progress,
        top_performers,
        at_risk,
    }
}

/// `PREFIX-NNN` numbered by 1-based collection position.
fn positional_id(prefix: &str, index: usize) -> String {
    format!("{}-{:03}", prefix, index + 1)
}

fn search_needle(search: Option<&str>) -> Option<String> {
    search.filter(|s| !s.is_empty()).map(str::to_lowercase)
}

/// One driver per distinct first word of the customer name, in
/// first-appearance order.
pub fn drivers(shipments: &[Shipment], search: Option<&str>) -> Vec<Driver> {
    let mut roster: Vec<Driver> = Vec::new();
    let mut by_name: HashMap<String, usize> = HashMap::new();

    for (index, shipment) in shipments.iter().enumerate() {
        let first_word = shipment.name.split(' ').next().unwrap_or_default();
        let name = format!("{} Driver", first_word);

        let slot = *by_name.entry(name.clone()).or_insert_with(|| {
            roster.push(Driver {
                id: positional_id("DRV", index),
                email: format!("{}@ultraship.com", name.to_lowercase().replacen(' ', ".", 1)),
                name,
                vehicle_type: shipment.class.clone(),
                status: DriverStatus::Active,
                total_shipments: 0,
                completed_shipments: 0,
                performance: 0,
            });
            roster.len() - 1
        });

        let driver = &mut roster[slot];
        driver.total_shipments += 1;
        if shipment.status() == ShipmentStatus::Delivered {
            driver.completed_shipments += 1;
        }
    }

    for driver in &mut roster {
        let share = driver.completed_shipments as f64 / driver.total_shipments as f64;
        driver.performance = (share * 100.0).round() as u32;
    }

    match search_needle(search) {
        Some(needle) => roster
            .into_iter()
            .filter(|d| d.matches_search(&needle))
            .collect(),
        None => roster,
    }
}

/// One vehicle per distinct freight class, in first-appearance order.
pub fn vehicles(shipments: &[Shipment], search: Option<&str>) -> Vec<Vehicle> {
    let mut fleet: Vec<Vehicle> = Vec::new();
    let mut by_class: HashMap<&str, usize> = HashMap::new();

    for (index, shipment) in shipments.iter().enumerate() {
        let slot = *by_class.entry(shipment.class.as_str()).or_insert_with(|| {
            fleet.push(Vehicle {
                id: positional_id("VEH", index),
                model: format!("{} Transport", shipment.class),
                kind: shipment.class.clone(),
                current_shipments: 0,
            });
            fleet.len() - 1
        });

        if shipment.status() == ShipmentStatus::InTransit {
            fleet[slot].current_shipments += 1;
        }
    }

    match search_needle(search) {
        Some(needle) => fleet
            .into_iter()
            .filter(|v| v.matches_search(&needle))
            .collect(),
        None => fleet,
    }
}
