//! Schema migrations for the `share_permissions` table.

use sqlx::PgPool;
use sqlx::migrate::Migrator;
use tracing::info;

use sharehub_core::error::{AppError, ErrorKind};

/// Migrations embedded from the workspace `migrations/` directory.
pub static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

/// Bring the share-permission schema up to date.
pub async fn run_migrations(pool: &PgPool) -> Result<(), AppError> {
    info!(
        embedded = MIGRATOR.iter().count(),
        "Applying share_permissions schema migrations"
    );

    MIGRATOR.run(pool).await.map_err(|e| {
        AppError::with_source(
            ErrorKind::Database,
            format!("Failed to migrate share_permissions schema: {e}"),
            e,
        )
    })?;

    info!("share_permissions schema is up to date");
    Ok(())
}
