//! Service configuration loaded from the environment

use anyhow::Result;
use config::{Config, Environment};
use serde::Deserialize;

/// Which repository implementation backs the service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Postgres,
    Memory,
}

/// Users service configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    /// Interface to bind
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Repository implementation
    pub storage: StorageBackend,
}

impl ServiceConfig {
    /// Load the configuration from `APP_*` environment variables
    ///
    /// # Environment Variables
    /// - `APP_HOST`: bind address (default: "0.0.0.0")
    /// - `APP_PORT`: listen port (default: 8085)
    /// - `APP_STORAGE`: `postgres` or `memory` (default: "postgres")
    pub fn from_env() -> Result<Self> {
        let settings = Config::builder()
            .set_default("host", "0.0.0.0")?
            .set_default("port", 8085)?
            .set_default("storage", "postgres")?
            .add_source(Environment::with_prefix("APP").try_parsing(true))
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Socket address string for the listener
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
