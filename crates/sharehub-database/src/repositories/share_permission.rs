//! Share-permission repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;

use sharehub_core::result::AppResult;
use sharehub_entity::share::{NewShareRecord, ShareRecord, SharePermission};

use crate::connection::db_error;
use crate::store::SharePermissionStore;

/// PostgreSQL-backed store over the `share_permissions` table.
#[derive(Debug, Clone)]
pub struct SharePermissionRepository {
    pool: PgPool,
}

impl SharePermissionRepository {
    /// Create a new share-permission repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SharePermissionStore for SharePermissionRepository {
    async fn find(
        &self,
        resource_id: &str,
        grantor: &str,
        grantee: &str,
    ) -> AppResult<Option<ShareRecord>> {
        sqlx::query_as::<_, ShareRecord>(
            "SELECT * FROM share_permissions \
             WHERE resource_id = $1 AND grantor = $2 AND grantee = $3",
        )
        .bind(resource_id)
        .bind(grantor)
        .bind(grantee)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to find share permission", e))
    }

    async fn find_by_resource(&self, resource_id: &str) -> AppResult<Vec<ShareRecord>> {
        sqlx::query_as::<_, ShareRecord>(
            "SELECT * FROM share_permissions WHERE resource_id = $1 ORDER BY id ASC",
        )
        .bind(resource_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to list resource shares", e))
    }

    async fn has_admin_grant(&self, resource_id: &str, grantee: &str) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM share_permissions \
             WHERE resource_id = $1 AND grantee = $2 AND permission = $3)",
        )
        .bind(resource_id)
        .bind(grantee)
        .bind(SharePermission::Admin.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("Failed to check admin grant", e))
    }

    async fn admin_grantees(&self, resource_id: &str) -> AppResult<Vec<String>> {
        sqlx::query_scalar::<_, String>(
            "SELECT DISTINCT grantee FROM share_permissions \
             WHERE resource_id = $1 AND permission = $2 ORDER BY grantee ASC",
        )
        .bind(resource_id)
        .bind(SharePermission::Admin.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to list resource admins", e))
    }

    async fn grantors_between(
        &self,
        resource_id: &str,
        grantor: &str,
        grantee: &str,
    ) -> AppResult<Vec<String>> {
        sqlx::query_scalar::<_, String>(
            "SELECT grantor FROM share_permissions \
             WHERE resource_id = $1 AND grantor = $2 AND grantee = $3 ORDER BY id ASC",
        )
        .bind(resource_id)
        .bind(grantor)
        .bind(grantee)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to list shares between principals", e))
    }

    async fn admin_grants_received(&self, grantee: &str) -> AppResult<Vec<ShareRecord>> {
        sqlx::query_as::<_, ShareRecord>(
            "SELECT * FROM share_permissions \
             WHERE grantee = $1 AND permission = $2 ORDER BY id ASC",
        )
        .bind(grantee)
        .bind(SharePermission::Admin.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to list admin grants received", e))
    }

    async fn admin_grantees_by(
        &self,
        resource_id: &str,
        grantor: &str,
    ) -> AppResult<Vec<String>> {
        sqlx::query_scalar::<_, String>(
            "SELECT grantee FROM share_permissions \
             WHERE resource_id = $1 AND grantor = $2 AND permission = $3 ORDER BY grantee ASC",
        )
        .bind(resource_id)
        .bind(grantor)
        .bind(SharePermission::Admin.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to list admin grants issued", e))
    }

    async fn insert(&self, record: &NewShareRecord) -> AppResult<ShareRecord> {
        sqlx::query_as::<_, ShareRecord>(
            "INSERT INTO share_permissions (resource_id, grantor, grantee, permission) \
             VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(&record.resource_id)
        .bind(&record.grantor)
        .bind(&record.grantee)
        .bind(record.permission.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("Failed to create share permission", e))
    }

    async fn upsert(&self, record: &NewShareRecord) -> AppResult<ShareRecord> {
        debug!(
            resource_id = %record.resource_id,
            grantor = %record.grantor,
            grantee = %record.grantee,
            "Upserting share permission"
        );

        sqlx::query_as::<_, ShareRecord>(
            "INSERT INTO share_permissions (resource_id, grantor, grantee, permission) \
             VALUES ($1, $2, $3, $4) \
             ON CONFLICT (resource_id, grantor, grantee) \
             DO UPDATE SET permission = EXCLUDED.permission, created_at = NOW(), \
             id = nextval(pg_get_serial_sequence('share_permissions', 'id')) \
             RETURNING *",
        )
        .bind(&record.resource_id)
        .bind(&record.grantor)
        .bind(&record.grantee)
        .bind(record.permission.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("Failed to update share permission", e))
    }

    async fn delete(&self, resource_id: &str, grantor: &str, grantee: &str) -> AppResult<bool> {
        let result = sqlx::query(
            "DELETE FROM share_permissions \
             WHERE resource_id = $1 AND grantor = $2 AND grantee = $3",
        )
        .bind(resource_id)
        .bind(grantor)
        .bind(grantee)
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to delete share permission", e))?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_by_resource(&self, resource_id: &str) -> AppResult<u64> {
        let result = sqlx::query("DELETE FROM share_permissions WHERE resource_id = $1")
            .bind(resource_id)
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to delete resource shares", e))?;
        Ok(result.rows_affected())
    }

    async fn health_check(&self) -> AppResult<bool> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|v| v == 1)
            .map_err(|e| db_error("Health check failed", e))
    }
}
