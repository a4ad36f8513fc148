//! Configuration for Products API

use core_config::{AppInfo, ConfigError, FromEnv, app_info, env_or_default, server::ServerConfig};
use database::postgres::PostgresConfig;

pub use core_config::Environment;

/// Where product records live
#[derive(Clone, Debug)]
pub enum StoreBackend {
    /// Process-local store, empty at startup
    Memory,
    Postgres(PostgresConfig),
}

/// Environment variables:
/// - `PRODUCT_STORE`: `memory` (default) or `postgres`
/// - `DATABASE_URL` and `DB_*` pool settings when `postgres`
impl FromEnv for StoreBackend {
    fn from_env() -> Result<Self, ConfigError> {
        let backend = env_or_default("PRODUCT_STORE", "memory");

        match backend.to_ascii_lowercase().as_str() {
            "memory" => Ok(StoreBackend::Memory),
            "postgres" => Ok(StoreBackend::Postgres(PostgresConfig::from_env()?)),
            other => Err(ConfigError::InvalidValue {
                key: "PRODUCT_STORE".to_string(),
                details: format!("expected 'memory' or 'postgres', got '{}'", other),
            }),
        }
    }
}

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub server: ServerConfig,
    pub environment: Environment,
    pub store: StoreBackend,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            app: app_info!(),
            server: ServerConfig::from_env()?,
            environment: Environment::from_env(),
            store: StoreBackend::from_env()?,
        })
    }
}
