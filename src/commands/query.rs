//! Admin and permission query commands.

use clap::Args;
use serde::Serialize;

use sharehub_core::error::AppError;
use sharehub_service::SharingRegistry;

use super::share::{EdgeArgs, ResourceArgs};
use crate::output::{self, AdministeredRow, OutputFormat, PrincipalRow};

/// Arguments for is-admin
#[derive(Debug, Args)]
pub struct IsAdminArgs {
    /// Resource ID
    pub resource_id: String,
    /// Principal to check
    pub principal: String,
}

/// A single grantee
#[derive(Debug, Args)]
pub struct GranteeArgs {
    /// Principal holding the admin grants
    pub grantee: String,
}

/// Arguments for issued
#[derive(Debug, Args)]
pub struct IssuedArgs {
    /// Resource ID
    pub resource_id: String,
    /// Principal that issued the admin grants
    #[arg(long = "from")]
    pub grantor: String,
}

#[derive(Debug, Serialize)]
struct AdminCheck<'a> {
    resource_id: &'a str,
    principal: &'a str,
    is_admin: bool,
}

fn principal_rows(principals: impl IntoIterator<Item = String>) -> Vec<PrincipalRow> {
    principals
        .into_iter()
        .map(|principal| PrincipalRow { principal })
        .collect()
}

/// Check admin status
pub async fn is_admin(
    registry: &SharingRegistry,
    args: &IsAdminArgs,
    format: OutputFormat,
) -> Result<(), AppError> {
    let is_admin = registry
        .is_admin(&args.resource_id, &args.principal)
        .await?;
    match format {
        OutputFormat::Table => println!("{is_admin}"),
        OutputFormat::Json => output::print_item(
            &AdminCheck {
                resource_id: &args.resource_id,
                principal: &args.principal,
                is_admin,
            },
            format,
        ),
    }
    Ok(())
}

/// List admins of a resource
pub async fn admins(
    registry: &SharingRegistry,
    args: &ResourceArgs,
    format: OutputFormat,
) -> Result<(), AppError> {
    let admins = registry.list_admins(&args.resource_id).await?;
    output::print_list(&principal_rows(admins), format);
    Ok(())
}

/// List grantors of the shares on an edge
pub async fn between(
    registry: &SharingRegistry,
    args: &EdgeArgs,
    format: OutputFormat,
) -> Result<(), AppError> {
    let grantors = registry
        .list_shares_between(&args.resource_id, &args.grantor, &args.grantee)
        .await?;
    output::print_list(&principal_rows(grantors), format);
    Ok(())
}

/// List resources administered by a grantee
pub async fn administered(
    registry: &SharingRegistry,
    args: &GranteeArgs,
    format: OutputFormat,
) -> Result<(), AppError> {
    let rows: Vec<AdministeredRow> = registry
        .list_resources_administered_for(&args.grantee)
        .await?
        .into_iter()
        .map(|(resource_id, grantor)| AdministeredRow {
            resource_id,
            grantor,
        })
        .collect();
    output::print_list(&rows, format);
    Ok(())
}

/// List admins promoted by a grantor
pub async fn issued(
    registry: &SharingRegistry,
    args: &IssuedArgs,
    format: OutputFormat,
) -> Result<(), AppError> {
    let grantees = registry
        .list_admin_grants_issued(&args.resource_id, &args.grantor)
        .await?;
    output::print_list(&principal_rows(grantees), format);
    Ok(())
}
