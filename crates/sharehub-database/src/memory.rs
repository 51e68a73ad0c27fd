//! In-memory share-permission store.
//!
//! Mirrors the semantics of the `share_permissions` table, including the
//! unique edge key and creation-order identifiers. Used for tests and
//! throwaway runs; nothing survives the process.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use sharehub_core::error::AppError;
use sharehub_core::result::AppResult;
use sharehub_entity::share::{NewShareRecord, ShareRecord};

use crate::store::SharePermissionStore;

type EdgeKey = (String, String, String);

#[derive(Debug, Default)]
struct MemoryState {
    next_id: i64,
    records: BTreeMap<EdgeKey, ShareRecord>,
}

impl MemoryState {
    fn write(&mut self, record: &NewShareRecord) -> ShareRecord {
        self.next_id += 1;
        let row = ShareRecord {
            id: self.next_id,
            resource_id: record.resource_id.clone(),
            grantor: record.grantor.clone(),
            grantee: record.grantee.clone(),
            permission: record.permission,
            created_at: Utc::now(),
        };
        self.records.insert(edge_key(record), row.clone());
        row
    }

    fn select<F>(&self, filter: F) -> Vec<ShareRecord>
    where
        F: Fn(&ShareRecord) -> bool,
    {
        let mut rows: Vec<ShareRecord> = self
            .records
            .values()
            .filter(|r| filter(r))
            .cloned()
            .collect();
        rows.sort_by_key(|r| r.id);
        rows
    }
}

fn edge_key(record: &NewShareRecord) -> EdgeKey {
    (
        record.resource_id.clone(),
        record.grantor.clone(),
        record.grantee.clone(),
    )
}

/// Process-local [`SharePermissionStore`].
#[derive(Debug, Default)]
pub struct MemorySharePermissionStore {
    state: RwLock<MemoryState>,
}

impl MemorySharePermissionStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SharePermissionStore for MemorySharePermissionStore {
    async fn find(
        &self,
        resource_id: &str,
        grantor: &str,
        grantee: &str,
    ) -> AppResult<Option<ShareRecord>> {
        let key = (
            resource_id.to_string(),
            grantor.to_string(),
            grantee.to_string(),
        );
        Ok(self.state.read().await.records.get(&key).cloned())
    }

    async fn find_by_resource(&self, resource_id: &str) -> AppResult<Vec<ShareRecord>> {
        Ok(self
            .state
            .read()
            .await
            .select(|r| r.resource_id == resource_id))
    }

    async fn has_admin_grant(&self, resource_id: &str, grantee: &str) -> AppResult<bool> {
        Ok(self.state.read().await.records.values().any(|r| {
            r.resource_id == resource_id && r.grantee == grantee && r.is_admin_grant()
        }))
    }

    async fn admin_grantees(&self, resource_id: &str) -> AppResult<Vec<String>> {
        let state = self.state.read().await;
        let mut grantees: Vec<String> = state
            .records
            .values()
            .filter(|r| r.resource_id == resource_id && r.is_admin_grant())
            .map(|r| r.grantee.clone())
            .collect();
        grantees.sort();
        grantees.dedup();
        Ok(grantees)
    }

    async fn grantors_between(
        &self,
        resource_id: &str,
        grantor: &str,
        grantee: &str,
    ) -> AppResult<Vec<String>> {
        Ok(self
            .state
            .read()
            .await
            .select(|r| r.matches(resource_id, grantor, grantee))
            .into_iter()
            .map(|r| r.grantor)
            .collect())
    }

    async fn admin_grants_received(&self, grantee: &str) -> AppResult<Vec<ShareRecord>> {
        Ok(self
            .state
            .read()
            .await
            .select(|r| r.grantee == grantee && r.is_admin_grant()))
    }

    async fn admin_grantees_by(
        &self,
        resource_id: &str,
        grantor: &str,
    ) -> AppResult<Vec<String>> {
        let state = self.state.read().await;
        let mut grantees: Vec<String> = state
            .records
            .values()
            .filter(|r| r.resource_id == resource_id && r.grantor == grantor && r.is_admin_grant())
            .map(|r| r.grantee.clone())
            .collect();
        grantees.sort();
        Ok(grantees)
    }

    async fn insert(&self, record: &NewShareRecord) -> AppResult<ShareRecord> {
        let mut state = self.state.write().await;
        if state.records.contains_key(&edge_key(record)) {
            return Err(AppError::conflict(format!(
                "Share of {} from {} to {} already exists",
                record.resource_id, record.grantor, record.grantee
            )));
        }
        Ok(state.write(record))
    }

    async fn upsert(&self, record: &NewShareRecord) -> AppResult<ShareRecord> {
        let mut state = self.state.write().await;
        state.records.remove(&edge_key(record));
        Ok(state.write(record))
    }

    async fn delete(&self, resource_id: &str, grantor: &str, grantee: &str) -> AppResult<bool> {
        let key = (
            resource_id.to_string(),
            grantor.to_string(),
            grantee.to_string(),
        );
        Ok(self.state.write().await.records.remove(&key).is_some())
    }

    async fn delete_by_resource(&self, resource_id: &str) -> AppResult<u64> {
        let mut state = self.state.write().await;
        let before = state.records.len();
        state.records.retain(|(rid, _, _), _| rid != resource_id);
        Ok((before - state.records.len()) as u64)
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }
}
