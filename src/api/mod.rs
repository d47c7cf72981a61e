//! HTTP API layer for UltraShip Core.
//!
//! Provides REST endpoints for shipment listing, management and derived views.

pub mod handlers;
mod routes;
mod types;

pub use routes::build_router;
