//! Configuration module for UltraShip Core.
//!
//! Loads configuration from YAML files and environment variables.

use config::{Config as ConfigLoader, Environment, File};
use serde::Deserialize;

use crate::error::ShipResult;

/// Root configuration structure.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub auth: AuthConfig,
    pub shipments: ShipmentsConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Origins allowed by CORS. Empty means any origin.
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

/// Bearer token configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub jwt_issuer: String,
    /// Validity window of issued tokens.
    pub token_duration_minutes: i64,
}

/// Shipment defaults and startup data.
#[derive(Debug, Clone, Deserialize)]
pub struct ShipmentsConfig {
    /// Origin assigned when a created shipment omits one.
    pub default_origin: String,
    /// Destination assigned when a created shipment omits one.
    pub default_destination: String,
    /// Cargo item used when a created shipment lists none.
    pub default_cargo: String,
    /// Start with the demo fleet instead of an empty collection.
    pub seed: bool,
}

impl Config {
    /// Load configuration from files and environment.
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (ULTRASHIP__SECTION__KEY)
    /// 2. config/local.yaml (if exists)
    /// 3. config/default.yaml (if exists)
    /// 4. Built-in defaults
    pub fn load() -> ShipResult<Self> {
        let config = ConfigLoader::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 4001)?
            .set_default("auth.jwt_secret", "ultra-secret-key")?
            .set_default("auth.jwt_issuer", "ultraship-core")?
            .set_default("auth.token_duration_minutes", 60)?
            .set_default("shipments.default_origin", "Primary Hub")?
            .set_default("shipments.default_destination", "Regional DC")?
            .set_default("shipments.default_cargo", "General Cargo")?
            .set_default("shipments.seed", true)?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            .add_source(
                Environment::with_prefix("ULTRASHIP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(config.try_deserialize()?)
    }
}

impl Default for ShipmentsConfig {
    fn default() -> Self {
        Self {
            default_origin: "Primary Hub".to_string(),
            default_destination: "Regional DC".to_string(),
            default_cargo: "General Cargo".to_string(),
            seed: true,
        }
    }
}
