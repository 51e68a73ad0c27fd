//! Storage seam for share-permission records.

use async_trait::async_trait;

use sharehub_core::result::AppResult;
use sharehub_entity::share::{NewShareRecord, ShareRecord};

/// Persistent storage of share-permission records.
///
/// Implementations must enforce uniqueness of the
/// `(resource_id, grantor, grantee)` key and return a
/// [`Conflict`](sharehub_core::error::ErrorKind::Conflict) error from
/// [`insert`](Self::insert) when it would be violated. Listings are in
/// creation order unless stated otherwise.
#[async_trait]
pub trait SharePermissionStore: Send + Sync + std::fmt::Debug + 'static {
    /// Find the record for one edge.
    async fn find(
        &self,
        resource_id: &str,
        grantor: &str,
        grantee: &str,
    ) -> AppResult<Option<ShareRecord>>;

    /// All records on a resource.
    async fn find_by_resource(&self, resource_id: &str) -> AppResult<Vec<ShareRecord>>;

    /// Whether `grantee` holds an admin grant on the resource from anyone.
    async fn has_admin_grant(&self, resource_id: &str, grantee: &str) -> AppResult<bool>;

    /// Distinct grantees holding an admin grant on the resource, sorted.
    async fn admin_grantees(&self, resource_id: &str) -> AppResult<Vec<String>>;

    /// The grantor column of every record matching the edge.
    async fn grantors_between(
        &self,
        resource_id: &str,
        grantor: &str,
        grantee: &str,
    ) -> AppResult<Vec<String>>;

    /// Every admin grant received by `grantee`, across resources.
    async fn admin_grants_received(&self, grantee: &str) -> AppResult<Vec<ShareRecord>>;

    /// Grantees that `grantor` promoted to admin on the resource, sorted.
    async fn admin_grantees_by(&self, resource_id: &str, grantor: &str)
    -> AppResult<Vec<String>>;

    /// Insert a new record, failing with a conflict if the edge exists.
    async fn insert(&self, record: &NewShareRecord) -> AppResult<ShareRecord>;

    /// Atomically replace the record for the edge, creating it if absent.
    async fn upsert(&self, record: &NewShareRecord) -> AppResult<ShareRecord>;

    /// Delete the record for an edge. Returns `true` if one was removed.
    async fn delete(&self, resource_id: &str, grantor: &str, grantee: &str) -> AppResult<bool>;

    /// Delete every record on a resource. Returns the number removed.
    async fn delete_by_resource(&self, resource_id: &str) -> AppResult<u64>;

    /// Check that the backend is reachable.
    async fn health_check(&self) -> AppResult<bool>;
}
