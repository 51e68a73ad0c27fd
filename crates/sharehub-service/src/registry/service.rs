//! Sharing registry service.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use tracing::{debug, info};

use sharehub_core::error::AppError;
use sharehub_core::result::AppResult;
use sharehub_database::store::SharePermissionStore;
use sharehub_entity::share::{NewShareRecord, SharePermission, ShareRecord, validate_resource_id};

/// Authoritative registry of share-permission records.
///
/// Admin status is scoped per grantor edge: a grantee holding an `admin`
/// record is an administrator of the resource for shares issued by that
/// grantor, but [`is_admin`](Self::is_admin) and
/// [`list_admins`](Self::list_admins) answer across all grantors.
#[derive(Debug, Clone)]
pub struct SharingRegistry {
    store: Arc<dyn SharePermissionStore>,
}

impl SharingRegistry {
    /// Creates a registry over the given store.
    pub fn new(store: Arc<dyn SharePermissionStore>) -> Self {
        Self { store }
    }

    /// Whether `principal` holds an admin grant on the resource from any grantor.
    pub async fn is_admin(&self, resource_id: &str, principal: &str) -> AppResult<bool> {
        self.store.has_admin_grant(resource_id, principal).await
    }

    /// Every principal holding an admin grant on the resource.
    pub async fn list_admins(&self, resource_id: &str) -> AppResult<BTreeSet<String>> {
        Ok(self
            .store
            .admin_grantees(resource_id)
            .await?
            .into_iter()
            .collect())
    }

    /// The grantor of every record on the edge, in creation order.
    ///
    /// With the unique edge key this yields at most one element.
    pub async fn list_shares_between(
        &self,
        resource_id: &str,
        grantor: &str,
        grantee: &str,
    ) -> AppResult<Vec<String>> {
        self.store
            .grantors_between(resource_id, grantor, grantee)
            .await
    }

    /// Resources on which `grantee` holds an admin grant, mapped to the
    /// grantor that issued it.
    ///
    /// When several grantors promoted the same grantee on one resource the
    /// most recently written grant wins.
    pub async fn list_resources_administered_for(
        &self,
        grantee: &str,
    ) -> AppResult<BTreeMap<String, String>> {
        let grants = self.store.admin_grants_received(grantee).await?;

        let mut administered = BTreeMap::new();
        for grant in grants {
            if let Some(previous) = administered.insert(grant.resource_id.clone(), grant.grantor) {
                debug!(
                    resource_id = %grant.resource_id,
                    grantee = %grantee,
                    superseded_grantor = %previous,
                    "Multiple admin grants on one resource"
                );
            }
        }
        Ok(administered)
    }

    /// Grantees that `grantor` personally promoted to admin on the resource.
    pub async fn list_admin_grants_issued(
        &self,
        resource_id: &str,
        grantor: &str,
    ) -> AppResult<BTreeSet<String>> {
        Ok(self
            .store
            .admin_grantees_by(resource_id, grantor)
            .await?
            .into_iter()
            .collect())
    }

    /// The record for one edge, if any.
    pub async fn get_share(
        &self,
        resource_id: &str,
        grantor: &str,
        grantee: &str,
    ) -> AppResult<Option<ShareRecord>> {
        self.store.find(resource_id, grantor, grantee).await
    }

    /// Every record on a resource, in creation order.
    pub async fn list_resource_shares(&self, resource_id: &str) -> AppResult<Vec<ShareRecord>> {
        self.store.find_by_resource(resource_id).await
    }

    /// Creates a share record.
    ///
    /// Fails with a conflict error if the edge already has a record; the
    /// caller must revoke first or treat the share as already granted.
    pub async fn grant(
        &self,
        resource_id: &str,
        grantor: &str,
        grantee: &str,
        permission: SharePermission,
    ) -> AppResult<ShareRecord> {
        let record = NewShareRecord::new(resource_id, grantor, grantee, permission);
        record.validate()?;

        let row = self.store.insert(&record).await.map_err(|e| {
            if e.is_conflict() {
                AppError::conflict(format!(
                    "{grantor} has already shared {resource_id} with {grantee}"
                ))
            } else {
                e
            }
        })?;

        info!(
            resource_id = %row.resource_id,
            grantor = %row.grantor,
            grantee = %row.grantee,
            permission = %row.permission,
            "Share granted"
        );

        Ok(row)
    }

    /// Removes the record for an edge.
    ///
    /// Revoking an edge that has no record is a no-op; the return value
    /// reports whether anything was removed.
    pub async fn revoke(&self, resource_id: &str, grantor: &str, grantee: &str) -> AppResult<bool> {
        let removed = self.store.delete(resource_id, grantor, grantee).await?;

        if removed {
            info!(
                resource_id = %resource_id,
                grantor = %grantor,
                grantee = %grantee,
                "Share revoked"
            );
        } else {
            debug!(
                resource_id = %resource_id,
                grantor = %grantor,
                grantee = %grantee,
                "Revoke of absent share ignored"
            );
        }

        Ok(removed)
    }

    /// Removes the record for an edge, failing with not-found if absent.
    pub async fn revoke_existing(
        &self,
        resource_id: &str,
        grantor: &str,
        grantee: &str,
    ) -> AppResult<()> {
        if self.revoke(resource_id, grantor, grantee).await? {
            Ok(())
        } else {
            Err(AppError::not_found(format!(
                "No share of {resource_id} from {grantor} to {grantee}"
            )))
        }
    }

    /// Sets the permission on an edge in one atomic step.
    ///
    /// Creates the record if the edge had none. Concurrent readers observe
    /// either the previous permission or the new one.
    pub async fn update(
        &self,
        resource_id: &str,
        grantor: &str,
        grantee: &str,
        permission: SharePermission,
    ) -> AppResult<ShareRecord> {
        let record = NewShareRecord::new(resource_id, grantor, grantee, permission);
        record.validate()?;

        let row = self.store.upsert(&record).await?;

        info!(
            resource_id = %row.resource_id,
            grantor = %row.grantor,
            grantee = %row.grantee,
            permission = %row.permission,
            "Share permission updated"
        );

        Ok(row)
    }

    /// Deletes every record on a resource, e.g. after the resource itself
    /// was removed. Returns the number of records deleted.
    pub async fn purge_resource(&self, resource_id: &str) -> AppResult<u64> {
        validate_resource_id(resource_id)?;
        let removed = self.store.delete_by_resource(resource_id).await?;
        info!(resource_id = %resource_id, removed, "Resource shares purged");
        Ok(removed)
    }

    /// Checks that the backing store is reachable.
    pub async fn health_check(&self) -> AppResult<bool> {
        self.store.health_check().await
    }
}
