//! Share registry configuration.

use serde::{Deserialize, Serialize};

/// Storage backend holding share-permission records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegistryBackend {
    /// The `share_permissions` table in PostgreSQL.
    #[default]
    Postgres,
    /// A process-local map; contents are lost on exit.
    Memory,
}

/// Share registry settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Which backend to open.
    #[serde(default)]
    pub backend: RegistryBackend,
    /// Apply pending migrations when the postgres backend is opened.
    #[serde(default = "default_true")]
    pub run_migrations: bool,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            backend: RegistryBackend::default(),
            run_migrations: true,
        }
    }
}

fn default_true() -> bool {
    true
}
