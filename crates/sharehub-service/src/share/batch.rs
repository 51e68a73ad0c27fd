//! Batch sharing: share many resources with one user or group in a single call.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use sharehub_core::error::AppError;
use sharehub_core::result::AppResult;
use sharehub_entity::share::{SharePermission, validate_principal, validate_resource_id};

use crate::context::RequestContext;
use crate::directory::{GroupDirectory, GroupShares, ResourceDirectory, UserDirectory};
use crate::registry::SharingRegistry;

/// Operation requested by a batch call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BatchOperation {
    /// Create shares.
    Share,
}

impl FromStr for BatchOperation {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "share" => Ok(Self::Share),
            _ => Err(AppError::validation(format!("Invalid operation: '{s}'"))),
        }
    }
}

/// Kind of principal the resources are shared with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShareType {
    /// A single user account.
    User,
    /// Every member of a group.
    Group,
}

impl FromStr for ShareType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Self::User),
            "group" => Ok(Self::Group),
            _ => Err(AppError::validation(format!("Invalid share type: '{s}'"))),
        }
    }
}

impl fmt::Display for ShareType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User => write!(f, "user"),
            Self::Group => write!(f, "group"),
        }
    }
}

/// Raw batch request as received from a front-end.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchShareRequest {
    /// Requested operation; only `share` is supported.
    pub operation: String,
    /// Target kind: `user` or `group`.
    pub share_type: String,
    /// User to share with; required when `share_type` is `user`.
    #[serde(default)]
    pub username: Option<String>,
    /// Group to share with; required when `share_type` is `group`.
    #[serde(default)]
    pub group_id: Option<i64>,
    /// Permission code; defaults to read-write.
    #[serde(default)]
    pub permission: Option<String>,
    /// Resources to share.
    pub resource_ids: Vec<String>,
}

/// A resource that was shared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareSuccess {
    /// The shared resource.
    pub resource_id: String,
    /// User it was shared with, for user shares.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Group it was shared with, for group shares.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<i64>,
    /// Permission granted.
    pub permission: SharePermission,
}

/// A resource that could not be shared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShareFailure {
    /// The resource that failed.
    pub resource_id: String,
    /// Why it failed.
    pub error_msg: String,
}

/// Per-resource outcome of a batch call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchShareResult {
    /// Resources shared successfully.
    pub success: Vec<ShareSuccess>,
    /// Resources that were skipped, with the reason.
    pub failed: Vec<ShareFailure>,
}

/// Resolved recipient of a batch.
#[derive(Debug, Clone, Copy)]
enum ShareTarget<'a> {
    User(&'a str),
    Group(i64),
}

/// Shares resources on behalf of the acting principal.
///
/// The actor may share a resource it owns, or one it administers through
/// an admin grant. Every created record names the actor as grantor.
#[derive(Clone)]
pub struct BatchShareService {
    registry: Arc<SharingRegistry>,
    resources: Arc<dyn ResourceDirectory>,
    users: Arc<dyn UserDirectory>,
    groups: Arc<dyn GroupDirectory>,
    group_shares: Arc<dyn GroupShares>,
}

impl fmt::Debug for BatchShareService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BatchShareService")
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}

impl BatchShareService {
    /// Creates a new batch share service.
    pub fn new(
        registry: Arc<SharingRegistry>,
        resources: Arc<dyn ResourceDirectory>,
        users: Arc<dyn UserDirectory>,
        groups: Arc<dyn GroupDirectory>,
        group_shares: Arc<dyn GroupShares>,
    ) -> Self {
        Self {
            registry,
            resources,
            users,
            groups,
            group_shares,
        }
    }

    /// Runs a batch request.
    ///
    /// Malformed requests, unknown targets and sharing to a group the actor
    /// does not belong to fail the whole call. Problems with individual
    /// resources are reported in [`BatchShareResult::failed`] while the
    /// rest proceed.
    pub async fn execute(
        &self,
        ctx: &RequestContext,
        req: BatchShareRequest,
    ) -> AppResult<BatchShareResult> {
        req.operation.parse::<BatchOperation>()?;
        let share_type: ShareType = req.share_type.parse()?;
        let permission = match req.permission.as_deref() {
            Some(code) => code.parse::<SharePermission>()?,
            None => SharePermission::default(),
        };

        if req.resource_ids.is_empty() {
            return Err(AppError::validation("resource_ids must not be empty"));
        }

        let target = self.resolve_target(ctx, share_type, &req).await?;

        let mut result = BatchShareResult::default();
        for resource_id in &req.resource_ids {
            match self.share_one(ctx, resource_id, target, permission).await? {
                Ok(success) => result.success.push(success),
                Err(error_msg) => result.failed.push(ShareFailure {
                    resource_id: resource_id.clone(),
                    error_msg,
                }),
            }
        }

        info!(
            actor = %ctx.principal,
            share_type = %share_type,
            username = ?req.username,
            group_id = ?req.group_id,
            succeeded = result.success.len(),
            failed = result.failed.len(),
            "Batch share completed"
        );

        Ok(result)
    }

    /// Checks the recipient named by the request.
    async fn resolve_target<'a>(
        &self,
        ctx: &RequestContext,
        share_type: ShareType,
        req: &'a BatchShareRequest,
    ) -> AppResult<ShareTarget<'a>> {
        match share_type {
            ShareType::User => {
                let username = req
                    .username
                    .as_deref()
                    .ok_or_else(|| AppError::validation("username is required"))?;
                validate_principal("username", username)?;

                if !self.users.user_exists(username).await? {
                    return Err(AppError::not_found(format!("User {username} not found")));
                }
                Ok(ShareTarget::User(username))
            }
            ShareType::Group => {
                let group_id = req
                    .group_id
                    .ok_or_else(|| AppError::validation("group_id is required"))?;

                if !self.groups.group_exists(group_id).await? {
                    return Err(AppError::not_found(format!("Group {group_id} not found")));
                }
                if !self.groups.is_member(group_id, &ctx.principal).await? {
                    return Err(AppError::authorization("Permission denied."));
                }
                Ok(ShareTarget::Group(group_id))
            }
        }
    }

    /// Shares one resource. The inner `Err` is a per-resource failure
    /// message; the outer error aborts the batch.
    async fn share_one(
        &self,
        ctx: &RequestContext,
        resource_id: &str,
        target: ShareTarget<'_>,
        permission: SharePermission,
    ) -> AppResult<Result<ShareSuccess, String>> {
        if let Err(e) = validate_resource_id(resource_id) {
            return Ok(Err(e.message));
        }

        let Some(owner) = self.resources.owner_of(resource_id).await? else {
            return Ok(Err(format!("Library {resource_id} not found.")));
        };

        if owner != ctx.principal && !self.registry.is_admin(resource_id, &ctx.principal).await? {
            return Ok(Err("Permission denied.".to_string()));
        }

        match target {
            ShareTarget::User(username) => {
                if owner == username {
                    return Ok(Err(format!("{username} is the owner of this library.")));
                }

                match self
                    .registry
                    .grant(resource_id, &ctx.principal, username, permission)
                    .await
                {
                    Ok(record) => Ok(Ok(ShareSuccess {
                        resource_id: record.resource_id,
                        username: Some(record.grantee),
                        group_id: None,
                        permission: record.permission,
                    })),
                    Err(e) if e.is_conflict() => {
                        Ok(Err(format!("This item has been shared to {username}.")))
                    }
                    Err(e) => Err(e),
                }
            }
            ShareTarget::Group(group_id) => {
                if self
                    .group_shares
                    .is_shared_to_group(resource_id, group_id)
                    .await?
                {
                    return Ok(Err(format!(
                        "This item has been shared to group {group_id}."
                    )));
                }

                self.group_shares
                    .share_to_group(resource_id, &ctx.principal, group_id, permission)
                    .await?;
                Ok(Ok(ShareSuccess {
                    resource_id: resource_id.to_string(),
                    username: None,
                    group_id: Some(group_id),
                    permission,
                }))
            }
        }
    }
}
