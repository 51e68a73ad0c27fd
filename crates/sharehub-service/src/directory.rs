//! Interfaces to the external services the share use cases depend on.
//!
//! Resource storage, user accounts and groups live outside ShareHub;
//! callers plug in adapters for their own backends.

use async_trait::async_trait;

use sharehub_core::result::AppResult;
use sharehub_entity::share::SharePermission;

/// Lookup of shared resources in the external storage service.
#[async_trait]
pub trait ResourceDirectory: Send + Sync + 'static {
    /// Owner of the resource, or `None` if it does not exist.
    async fn owner_of(&self, resource_id: &str) -> AppResult<Option<String>>;
}

/// Lookup of principals in the external account service.
#[async_trait]
pub trait UserDirectory: Send + Sync + 'static {
    /// Whether a user account exists for `principal`.
    async fn user_exists(&self, principal: &str) -> AppResult<bool>;
}

/// Lookup of groups in the external membership service.
#[async_trait]
pub trait GroupDirectory: Send + Sync + 'static {
    /// Whether the group exists.
    async fn group_exists(&self, group_id: i64) -> AppResult<bool>;

    /// Whether `principal` belongs to the group.
    async fn is_member(&self, group_id: i64, principal: &str) -> AppResult<bool>;
}

/// Group shares, which the storage service records itself.
#[async_trait]
pub trait GroupShares: Send + Sync + 'static {
    /// Whether the resource is already shared with the group.
    async fn is_shared_to_group(&self, resource_id: &str, group_id: i64) -> AppResult<bool>;

    /// Share the resource with the group on behalf of `grantor`.
    async fn share_to_group(
        &self,
        resource_id: &str,
        grantor: &str,
        group_id: i64,
        permission: SharePermission,
    ) -> AppResult<()>;
}
