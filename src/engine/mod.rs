//! Query engine for UltraShip Core.
//!
//! Pure functions over a borrowed shipment slice:
//! - Query: status filter, search, sort and pagination for listings
//! - Views: analytics summary, driver roster and vehicle fleet

mod query;
mod views;

pub use query::*;
pub use views::*;
