//! Storage layer for UltraShip Core.
//!
//! Holds the shipment collection in memory for the life of the process.
//! Restarting resets it to the seed set.

mod repository;
mod seed;

pub use repository::ShipmentStore;
pub use seed::seed_shipments;
