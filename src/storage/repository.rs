//! In-memory shipment store.

use std::collections::HashSet;
use std::sync::Arc;

use rand::Rng;
use tokio::sync::RwLock;

use crate::config::ShipmentsConfig;
use crate::domain::{AnalyticsSummary, Driver, NewShipment, Shipment, ShipmentPatch, Vehicle};
use crate::engine::{self, ShipmentPage, ShipmentQuery};
use crate::error::{ShipError, ShipResult};
use crate::storage::seed_shipments;

/// Upper bound (exclusive) of the random number in generated ids.
const ID_SPACE: u32 = 100_000;

/// Random draws before falling back to a sequential scan above `ID_SPACE`.
const ID_DRAW_ATTEMPTS: usize = 32;

/// Process-lifetime shipment collection.
///
/// Readers hold the read lock for a whole scan and writers hold the write
/// lock for a whole edit, so no request observes a partial mutation.
#[derive(Clone)]
pub struct ShipmentStore {
    shipments: Arc<RwLock<Vec<Shipment>>>,
    defaults: ShipmentsConfig,
}

impl ShipmentStore {
    /// Create a store holding `shipments` in the given order.
    pub fn new(shipments: Vec<Shipment>, defaults: ShipmentsConfig) -> Self {
        Self {
            shipments: Arc::new(RwLock::new(shipments)),
            defaults,
        }
    }

    /// Create a store from configuration, seeded with the demo fleet unless
    /// seeding is disabled.
    pub fn from_config(defaults: ShipmentsConfig) -> Self {
        let initial = if defaults.seed {
            seed_shipments()
        } else {
            Vec::new()
        };
        Self::new(initial, defaults)
    }

    /// Number of stored shipments.
    pub async fn count(&self) -> usize {
        self.shipments.read().await.len()
    }

    /// Run a listing query.
    pub async fn query(&self, query: &ShipmentQuery) -> ShipmentPage {
        let shipments = self.shipments.read().await;
        engine::run_query(&shipments, query)
    }

    /// Find a shipment by id.
    pub async fn get(&self, id: &str) -> Option<Shipment> {
        let shipments = self.shipments.read().await;
        shipments.iter().find(|s| s.id == id).cloned()
    }

    /// Insert a new shipment at the head of the collection.
    pub async fn create(&self, input: NewShipment) -> Shipment {
        let mut shipments = self.shipments.write().await;
        let id = next_shipment_id(&shipments);
        let shipment = input.into_shipment(id, &self.defaults);
        shipments.insert(0, shipment.clone());
        shipment
    }

    /// Merge `patch` over the shipment with `id`.
    pub async fn update(&self, id: &str, patch: ShipmentPatch) -> ShipResult<Shipment> {
        let mut shipments = self.shipments.write().await;
        let shipment = shipments
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| ShipError::NotFound(format!("Shipment {} not found", id)))?;

        patch.apply(shipment, &self.defaults);
        Ok(shipment.clone())
    }

    /// Remove the shipment with `id`. Returns `false` when there was none.
    pub async fn delete(&self, id: &str) -> bool {
        let mut shipments = self.shipments.write().await;
        match shipments.iter().position(|s| s.id == id) {
            Some(index) => {
                shipments.remove(index);
                true
            }
            None => false,
        }
    }

    /// Analytics over the current collection.
    pub async fn analytics(&self) -> AnalyticsSummary {
        let shipments = self.shipments.read().await;
        engine::analytics(&shipments)
    }

    /// Driver roster over the current collection.
    pub async fn drivers(&self, search: Option<&str>) -> Vec<Driver> {
        let shipments = self.shipments.read().await;
        engine::drivers(&shipments, search)
    }

    /// Vehicle fleet over the current collection.
    pub async fn vehicles(&self, search: Option<&str>) -> Vec<Vehicle> {
        let shipments = self.shipments.read().await;
        engine::vehicles(&shipments, search)
    }
}

/// `SHP-<n>` with a random `n` below `ID_SPACE`, never colliding with an
/// existing id.
fn next_shipment_id(existing: &[Shipment]) -> String {
    let taken: HashSet<&str> = existing.iter().map(|s| s.id.as_str()).collect();
    let mut rng = rand::thread_rng();

    for _ in 0..ID_DRAW_ATTEMPTS {
        let candidate = format!("SHP-{}", rng.gen_range(0..ID_SPACE));
        if !taken.contains(candidate.as_str()) {
            return candidate;
        }
    }

    // `taken` is finite, so this terminates.
    let mut n = u64::from(ID_SPACE);
    loop {
        let candidate = format!("SHP-{}", n);
        if !taken.contains(candidate.as_str()) {
            return candidate;
        }
        n += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> ShipmentStore {
        ShipmentStore::from_config(ShipmentsConfig::default())
    }

    fn new_shipment(name: &str) -> NewShipment {
        NewShipment {
            name: name.to_string(),
            age: 3,
            class: "Standard".to_string(),
            subjects: vec!["Cement".to_string(), "Bricks".to_string()],
            attendance: 60.0,
            origin: Some("Pune Yard".to_string()),
            destination: None,
            priority: None,
        }
    }

    #[tokio::test]
    async fn test_seeded_store() {
        let store = seeded();
        assert_eq!(store.count().await, 20);
    }

    #[tokio::test]
    async fn test_unseeded_store_is_empty() {
        let store = ShipmentStore::from_config(ShipmentsConfig {
            seed: false,
            ..ShipmentsConfig::default()
        });
        assert_eq!(store.count().await, 0);
    }

    #[tokio::test]
    async fn test_create_then_get() {
        let store = seeded();
        let created = store.create(new_shipment("BuildMat")).await;

        assert!(created.id.starts_with("SHP-"));
        assert_eq!(created.name, "BuildMat");
        assert_eq!(created.age, 3);
        assert_eq!(created.class, "Standard");
        assert_eq!(created.subjects, vec!["Cement", "Bricks"]);
        assert_eq!(created.attendance, 60.0);
        assert_eq!(created.origin.as_deref(), Some("Pune Yard"));
        assert_eq!(created.destination.as_deref(), Some("Regional DC"));
        assert_eq!(created.priority.as_deref(), Some("NORMAL"));

        let fetched = store.get(&created.id).await.unwrap();
        assert_eq!(fetched, created);
        assert_eq!(store.count().await, 21);
    }

    #[tokio::test]
    async fn test_create_inserts_at_head() {
        let store = seeded();
        let created = store.create(new_shipment("TextileWorld")).await;

        let page = store.query(&ShipmentQuery::default()).await;
        assert_eq!(page.shipments[0].id, created.id);
    }

    #[tokio::test]
    async fn test_created_ids_unique() {
        let store = seeded();
        let mut ids = HashSet::new();
        for i in 0..200 {
            let created = store.create(new_shipment(&format!("Customer {i}"))).await;
            assert!(ids.insert(created.id));
        }
    }

    #[test]
    fn test_next_id_skips_taken_space() {
        let existing: Vec<Shipment> = (0..ID_SPACE)
            .map(|n| Shipment {
                id: format!("SHP-{n}"),
                name: String::new(),
                age: 0,
                class: String::new(),
                subjects: vec![],
                attendance: 0.0,
                origin: None,
                destination: None,
                priority: None,
            })
            .collect();

        assert_eq!(next_shipment_id(&existing), format!("SHP-{}", ID_SPACE));
    }

    #[tokio::test]
    async fn test_update_merges_partial_fields() {
        let store = seeded();
        let before = store.get("4").await.unwrap();

        let updated = store
            .update(
                "4",
                ShipmentPatch {
                    attendance: Some(25.0),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.attendance, 25.0);
        assert_eq!(updated.name, before.name);
        assert_eq!(updated.subjects, before.subjects);
        assert_eq!(updated.origin, before.origin);
        assert_eq!(store.get("4").await.unwrap(), updated);
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let store = seeded();
        let result = store.update("nope", ShipmentPatch::default()).await;
        assert!(matches!(result, Err(ShipError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_twice() {
        let store = seeded();
        assert!(store.delete("7").await);
        assert!(!store.delete("7").await);
        assert!(store.get("7").await.is_none());
        assert_eq!(store.count().await, 19);
    }

    #[tokio::test]
    async fn test_views_follow_mutations() {
        let store = seeded();
        store
            .update(
                "4",
                ShipmentPatch {
                    attendance: Some(100.0),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let summary = store.analytics().await;
        assert_eq!(summary.status_counts.pending, 0);
        assert_eq!(summary.status_counts.delivered, 6);

        let tata = store.drivers(Some("tata")).await;
        assert_eq!(tata[0].performance, 100);

        let economy = store.vehicles(Some("economy")).await;
        assert_eq!(economy[0].current_shipments, 3);
    }
}
