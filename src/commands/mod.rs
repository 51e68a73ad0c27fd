//! CLI command definitions and dispatch.

pub mod migrate;
pub mod query;
pub mod share;

use clap::{Parser, Subcommand};

use sharehub_core::config::{AppConfig, RegistryBackend};
use sharehub_core::error::AppError;
use sharehub_service::SharingRegistry;

use crate::output::{self, OutputFormat};

/// ShareHub share-permission registry
#[derive(Debug, Parser)]
#[command(name = "sharehub", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Share a resource with a principal
    Grant(share::GrantArgs),
    /// Remove a share
    Revoke(share::RevokeArgs),
    /// Set the permission of a share, creating it if absent
    Update(share::GrantArgs),
    /// Show the share between two principals
    Show(share::EdgeArgs),
    /// List every share on a resource
    List(share::ResourceArgs),
    /// Delete every share on a resource
    Purge(share::PurgeArgs),
    /// Check whether a principal administers a resource
    IsAdmin(query::IsAdminArgs),
    /// List administrators of a resource
    Admins(share::ResourceArgs),
    /// List grantors of shares between two principals
    Between(share::EdgeArgs),
    /// List resources a principal administers, with the granting principal
    Administered(query::GranteeArgs),
    /// List principals a grantor promoted to admin on a resource
    Issued(query::IssuedArgs),
    /// Database migration management
    Migrate(migrate::MigrateArgs),
    /// Check that the registry backend is reachable
    Health,
}

impl Commands {
    /// Whether the command writes share records.
    pub fn is_mutating(&self) -> bool {
        matches!(
            self,
            Self::Grant(_) | Self::Revoke(_) | Self::Update(_) | Self::Purge(_)
        )
    }
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self, config: &AppConfig) -> Result<(), AppError> {
        if let Commands::Migrate(args) = &self.command {
            return migrate::execute(args, config).await;
        }

        if config.registry.backend == RegistryBackend::Memory && self.command.is_mutating() {
            tracing::warn!("Mutating command run against the in-memory backend");
            output::print_warning(
                "The memory backend does not persist; this change is lost when the command exits.",
            );
        }

        let registry = open_registry(config).await?;
        match &self.command {
            Commands::Grant(args) => share::grant(&registry, args, self.format).await,
            Commands::Revoke(args) => share::revoke(&registry, args).await,
            Commands::Update(args) => share::update(&registry, args, self.format).await,
            Commands::Show(args) => share::show(&registry, args, self.format).await,
            Commands::List(args) => share::list(&registry, args, self.format).await,
            Commands::Purge(args) => share::purge(&registry, args).await,
            Commands::IsAdmin(args) => query::is_admin(&registry, args, self.format).await,
            Commands::Admins(args) => query::admins(&registry, args, self.format).await,
            Commands::Between(args) => query::between(&registry, args, self.format).await,
            Commands::Administered(args) => {
                query::administered(&registry, args, self.format).await
            }
            Commands::Issued(args) => query::issued(&registry, args, self.format).await,
            Commands::Health => {
                if registry.health_check().await? {
                    output::print_success("Registry backend is reachable.");
                    Ok(())
                } else {
                    Err(AppError::database("Registry backend health check failed"))
                }
            }
            Commands::Migrate(_) => Ok(()),
        }
    }
}

/// Helper: open the configured store and wrap it in a registry
pub async fn open_registry(config: &AppConfig) -> Result<SharingRegistry, AppError> {
    let store = sharehub_database::open_store(config).await?;
    Ok(SharingRegistry::new(store))
}
