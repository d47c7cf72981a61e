//! UltraShip Core - Logistics Shipment Service
//!
//! Serves filtered, sorted and paginated shipment listings over an
//! in-memory fleet, with admin-gated edits and derived dashboard views.

use tokio::net::TcpListener;

mod api;
mod auth;
mod config;
mod domain;
mod engine;
mod error;
mod logging;
mod storage;

use crate::api::build_router;
use crate::auth::JwtManager;
use crate::config::Config;
use crate::storage::ShipmentStore;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// The shipment collection.
    pub store: ShipmentStore,
    /// JWT manager for token operations.
    pub jwt_manager: JwtManager,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file (if present)
    if let Err(e) = dotenvy::dotenv() {
        eprintln!("Note: No .env file loaded ({e})");
    }

    // Initialize logging
    logging::init();

    tracing::info!("Starting UltraShip Core v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config = Config::load().map_err(|e| {
        tracing::error!(error = %e, "Failed to load configuration");
        anyhow::Error::from(e)
    })?;

    tracing::info!(
        host = %config.server.host,
        port = %config.server.port,
        seed = config.shipments.seed,
        token_minutes = config.auth.token_duration_minutes,
        "Configuration loaded"
    );

    // Data lives for the process only; every start begins from the seed set.
    let store = ShipmentStore::from_config(config.shipments.clone());
    tracing::info!(shipments = store.count().await, "Shipment store initialized");

    let jwt_manager = JwtManager::new(
        &config.auth.jwt_secret,
        config.auth.jwt_issuer.clone(),
        config.auth.token_duration_minutes,
    );

    let state = AppState { store, jwt_manager };

    // Build router
    let app = build_router(state, &config.server.allowed_origins);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;

    tracing::info!(address = %addr, "Server listening");
    tracing::info!("Swagger UI available at http://{}/swagger-ui/", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
