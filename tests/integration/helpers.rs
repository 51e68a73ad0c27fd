//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use uuid::Uuid;

use sharehub_core::result::AppResult;
use sharehub_database::MemorySharePermissionStore;
use sharehub_entity::share::SharePermission;
use sharehub_service::{
    BatchShareService, GroupDirectory, GroupShares, ResourceDirectory, SharingRegistry,
    UserDirectory,
};

/// Fake storage service: resource id -> owner.
#[derive(Debug, Default)]
pub struct FakeResources {
    owners: RwLock<HashMap<String, String>>,
}

#[async_trait]
impl ResourceDirectory for FakeResources {
    async fn owner_of(&self, resource_id: &str) -> AppResult<Option<String>> {
        Ok(self.owners.read().unwrap().get(resource_id).cloned())
    }
}

/// Fake account service.
#[derive(Debug, Default)]
pub struct FakeUsers {
    users: RwLock<HashSet<String>>,
}

#[async_trait]
impl UserDirectory for FakeUsers {
    async fn user_exists(&self, principal: &str) -> AppResult<bool> {
        Ok(self.users.read().unwrap().contains(principal))
    }
}

/// Fake membership service plus the group shares it records.
#[derive(Debug, Default)]
pub struct FakeGroups {
    next_id: AtomicI64,
    members: RwLock<HashMap<i64, HashSet<String>>>,
    shares: RwLock<HashMap<(String, i64), (String, SharePermission)>>,
}

impl FakeGroups {
    /// Grantor and permission of a group share, if present.
    pub fn group_share(&self, resource_id: &str, group_id: i64) -> Option<(String, SharePermission)> {
        self.shares
            .read()
            .unwrap()
            .get(&(resource_id.to_string(), group_id))
            .cloned()
    }
}

#[async_trait]
impl GroupDirectory for FakeGroups {
    async fn group_exists(&self, group_id: i64) -> AppResult<bool> {
        Ok(self.members.read().unwrap().contains_key(&group_id))
    }

    async fn is_member(&self, group_id: i64, principal: &str) -> AppResult<bool> {
        Ok(self
            .members
            .read()
            .unwrap()
            .get(&group_id)
            .is_some_and(|m| m.contains(principal)))
    }
}

#[async_trait]
impl GroupShares for FakeGroups {
    async fn is_shared_to_group(&self, resource_id: &str, group_id: i64) -> AppResult<bool> {
        Ok(self
            .shares
            .read()
            .unwrap()
            .contains_key(&(resource_id.to_string(), group_id)))
    }

    async fn share_to_group(
        &self,
        resource_id: &str,
        grantor: &str,
        group_id: i64,
        permission: SharePermission,
    ) -> AppResult<()> {
        self.shares.write().unwrap().insert(
            (resource_id.to_string(), group_id),
            (grantor.to_string(), permission),
        );
        Ok(())
    }
}

/// Test application context
pub struct TestApp {
    /// Registry over an in-memory store
    pub registry: Arc<SharingRegistry>,
    /// Batch share service wired to the fakes below
    pub batch: BatchShareService,
    /// Fake resource directory
    pub resources: Arc<FakeResources>,
    /// Fake user directory
    pub users: Arc<FakeUsers>,
    /// Fake group directory and group-share backend
    pub groups: Arc<FakeGroups>,
}

impl TestApp {
    /// Create a new test application with an empty store
    pub fn new() -> Self {
        let store = Arc::new(MemorySharePermissionStore::new());
        let registry = Arc::new(SharingRegistry::new(store));
        let resources = Arc::new(FakeResources::default());
        let users = Arc::new(FakeUsers::default());
        let groups = Arc::new(FakeGroups::default());
        let batch = BatchShareService::new(
            Arc::clone(&registry),
            Arc::clone(&resources) as Arc<dyn ResourceDirectory>,
            Arc::clone(&users) as Arc<dyn UserDirectory>,
            Arc::clone(&groups) as Arc<dyn GroupDirectory>,
            Arc::clone(&groups) as Arc<dyn GroupShares>,
        );

        Self {
            registry,
            batch,
            resources,
            users,
            groups,
        }
    }

    /// Register a user account
    pub fn create_user(&self, username: &str) {
        self.users
            .users
            .write()
            .unwrap()
            .insert(username.to_string());
    }

    /// Create a resource owned by `owner` and return its ID
    pub fn create_resource(&self, owner: &str) -> String {
        let id = Uuid::new_v4().to_string();
        self.resources
            .owners
            .write()
            .unwrap()
            .insert(id.clone(), owner.to_string());
        id
    }

    /// Create a group with the given members and return its ID
    pub fn create_group(&self, members: &[&str]) -> i64 {
        let id = self.groups.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        self.groups
            .members
            .write()
            .unwrap()
            .insert(id, members.iter().map(|m| m.to_string()).collect());
        id
    }
}
