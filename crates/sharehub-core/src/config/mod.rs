//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate, overlaid with `SHAREHUB__`-prefixed environment
//! variables. Each sub-module represents a logical configuration section.

pub mod database;
pub mod logging;
pub mod registry;

use serde::{Deserialize, Serialize};

pub use self::database::DatabaseConfig;
pub use self::logging::LoggingConfig;
pub use self::registry::{RegistryBackend, RegistryConfig};

use crate::error::AppError;

/// Prefix for environment variable overrides (`SHAREHUB__DATABASE__URL`).
pub const ENV_PREFIX: &str = "SHAREHUB";

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Database connection settings.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Share registry settings.
    #[serde(default)]
    pub registry: RegistryConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file and the environment.
    ///
    /// A missing file is not an error; every section falls back to its
    /// defaults and may still be set through environment variables.
    pub fn load(path: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize::<Self>()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?
            .validated()
    }

    /// Parse configuration from an in-memory TOML document.
    pub fn from_toml(source: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::from_str(source, config::FileFormat::Toml))
            .build()?;

        config.try_deserialize::<Self>()?.validated()
    }

    /// Check cross-section constraints that serde defaults cannot express.
    fn validated(self) -> Result<Self, AppError> {
        if self.registry.backend == RegistryBackend::Postgres && self.database.url.is_empty() {
            return Err(AppError::configuration(
                "database.url is required when registry.backend = \"postgres\"",
            ));
        }
        Ok(self)
    }
}
