//! Database migration management commands.

use clap::{Args, Subcommand};

use sharehub_core::config::{AppConfig, RegistryBackend};
use sharehub_core::error::AppError;
use sharehub_database::DatabasePool;

use crate::output;

/// Arguments for the migrate command
#[derive(Debug, Args)]
pub struct MigrateArgs {
    /// Migration subcommand
    #[command(subcommand)]
    pub command: MigrateCommand,
}

/// Migration subcommands
#[derive(Debug, Subcommand)]
pub enum MigrateCommand {
    /// Run all pending migrations
    Run,
}

/// Execute migration commands
pub async fn execute(args: &MigrateArgs, config: &AppConfig) -> Result<(), AppError> {
    if config.registry.backend != RegistryBackend::Postgres {
        output::print_warning("The memory backend has no schema to migrate.");
        return Ok(());
    }

    match &args.command {
        MigrateCommand::Run => {
            let pool = DatabasePool::connect(&config.database).await?;
            println!("Running database migrations...");
            sharehub_database::migration::run_migrations(pool.pool()).await?;
            pool.close().await;
            output::print_success("All migrations applied successfully.");
        }
    }

    Ok(())
}
