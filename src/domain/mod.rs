//! Domain types for UltraShip Core.
//!
//! This module contains the shipment entity and the views derived from it.

mod analytics;
mod fleet;
mod shipment;

pub use analytics::*;
pub use fleet::*;
pub use shipment::*;
