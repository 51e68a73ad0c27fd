//! Share mutation and record listing commands.

use clap::Args;

use sharehub_core::error::AppError;
use sharehub_entity::share::SharePermission;
use sharehub_service::SharingRegistry;

use crate::output::{self, OutputFormat, ShareRow};

/// A `(resource, grantor, grantee)` edge
#[derive(Debug, Args)]
pub struct EdgeArgs {
    /// Resource ID
    pub resource_id: String,
    /// Principal that issued the share
    #[arg(long = "from")]
    pub grantor: String,
    /// Principal receiving the share
    #[arg(long = "to")]
    pub grantee: String,
}

/// Arguments for grant and update
#[derive(Debug, Args)]
pub struct GrantArgs {
    /// Share edge
    #[command(flatten)]
    pub edge: EdgeArgs,
    /// Permission: r, rw or admin
    #[arg(short, long, default_value = "rw")]
    pub permission: String,
}

/// Arguments for revoke
#[derive(Debug, Args)]
pub struct RevokeArgs {
    /// Share edge
    #[command(flatten)]
    pub edge: EdgeArgs,
    /// Fail if the share does not exist
    #[arg(long)]
    pub strict: bool,
}

/// A single resource
#[derive(Debug, Args)]
pub struct ResourceArgs {
    /// Resource ID
    pub resource_id: String,
}

/// Arguments for purge
#[derive(Debug, Args)]
pub struct PurgeArgs {
    /// Resource ID
    pub resource_id: String,
    /// Skip confirmation prompt
    #[arg(long)]
    pub force: bool,
}

/// Create a share
pub async fn grant(
    registry: &SharingRegistry,
    args: &GrantArgs,
    format: OutputFormat,
) -> Result<(), AppError> {
    let permission: SharePermission = args.permission.parse()?;
    let edge = &args.edge;
    let record = registry
        .grant(&edge.resource_id, &edge.grantor, &edge.grantee, permission)
        .await?;
    output::print_list(&[ShareRow::from(record)], format);
    Ok(())
}

/// Remove a share
pub async fn revoke(registry: &SharingRegistry, args: &RevokeArgs) -> Result<(), AppError> {
    let edge = &args.edge;
    if args.strict {
        registry
            .revoke_existing(&edge.resource_id, &edge.grantor, &edge.grantee)
            .await?;
        output::print_success("Share revoked.");
    } else if registry
        .revoke(&edge.resource_id, &edge.grantor, &edge.grantee)
        .await?
    {
        output::print_success("Share revoked.");
    } else {
        output::print_warning("No such share; nothing to revoke.");
    }
    Ok(())
}

/// Set the permission on a share
pub async fn update(
    registry: &SharingRegistry,
    args: &GrantArgs,
    format: OutputFormat,
) -> Result<(), AppError> {
    let permission: SharePermission = args.permission.parse()?;
    let edge = &args.edge;
    let record = registry
        .update(&edge.resource_id, &edge.grantor, &edge.grantee, permission)
        .await?;
    output::print_list(&[ShareRow::from(record)], format);
    Ok(())
}

/// Show one share
pub async fn show(
    registry: &SharingRegistry,
    args: &EdgeArgs,
    format: OutputFormat,
) -> Result<(), AppError> {
    let record = registry
        .get_share(&args.resource_id, &args.grantor, &args.grantee)
        .await?
        .ok_or_else(|| AppError::not_found("Share not found"))?;
    output::print_list(&[ShareRow::from(record)], format);
    Ok(())
}

/// List the shares on a resource
pub async fn list(
    registry: &SharingRegistry,
    args: &ResourceArgs,
    format: OutputFormat,
) -> Result<(), AppError> {
    let rows: Vec<ShareRow> = registry
        .list_resource_shares(&args.resource_id)
        .await?
        .into_iter()
        .map(ShareRow::from)
        .collect();
    output::print_list(&rows, format);
    Ok(())
}

/// Delete every share on a resource
pub async fn purge(registry: &SharingRegistry, args: &PurgeArgs) -> Result<(), AppError> {
    if !args.force {
        let confirm = dialoguer::Confirm::new()
            .with_prompt(format!(
                "Delete every share on {}? This cannot be undone.",
                args.resource_id
            ))
            .default(false)
            .interact()
            .map_err(|e| AppError::internal(format!("Input error: {e}")))?;

        if !confirm {
            println!("Cancelled.");
            return Ok(());
        }
    }

    let removed = registry.purge_resource(&args.resource_id).await?;
    output::print_success(&format!("Removed {removed} share(s)."));
    Ok(())
}
