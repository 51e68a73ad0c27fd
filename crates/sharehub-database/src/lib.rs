//! # sharehub-database
//!
//! PostgreSQL connection management, migrations, and the concrete
//! share-permission stores used by the registry.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;
pub mod store;

use std::sync::Arc;

use tracing::info;

use sharehub_core::config::{AppConfig, RegistryBackend};
use sharehub_core::result::AppResult;

pub use connection::DatabasePool;
pub use memory::MemorySharePermissionStore;
pub use repositories::SharePermissionRepository;
pub use store::SharePermissionStore;

/// Open the share-permission store selected by configuration.
pub async fn open_store(config: &AppConfig) -> AppResult<Arc<dyn SharePermissionStore>> {
    let store: Arc<dyn SharePermissionStore> = match config.registry.backend {
        RegistryBackend::Postgres => {
            let pool = DatabasePool::connect(&config.database).await?;
            if config.registry.run_migrations {
                migration::run_migrations(pool.pool()).await?;
            }
            Arc::new(SharePermissionRepository::new(pool.into_pool()))
        }
        RegistryBackend::Memory => {
            info!("Initializing in-memory share-permission store");
            Arc::new(MemorySharePermissionStore::new())
        }
    };

    Ok(store)
}
