//! Share-permission record entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use sharehub_core::AppError;

use super::permission::SharePermission;

/// Maximum length of a resource identifier (a UUID string).
pub const MAX_RESOURCE_ID_LEN: usize = 36;

/// Maximum length of a principal identifier (grantor or grantee).
pub const MAX_PRINCIPAL_LEN: usize = 255;

/// One share edge: `grantor` shared `resource_id` with `grantee`.
///
/// At most one record exists per `(resource_id, grantor, grantee)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct ShareRecord {
    /// Storage-assigned identifier, increasing in creation order.
    pub id: i64,
    /// ID of the shared resource.
    pub resource_id: String,
    /// Principal who issued the share.
    pub grantor: String,
    /// Principal receiving the share.
    pub grantee: String,
    /// Permission level granted.
    #[sqlx(try_from = "String")]
    pub permission: SharePermission,
    /// When the record was written.
    pub created_at: DateTime<Utc>,
}

impl ShareRecord {
    /// Whether this record makes the grantee an administrator.
    pub fn is_admin_grant(&self) -> bool {
        self.permission.is_admin()
    }

    /// Whether this record matches the given edge.
    pub fn matches(&self, resource_id: &str, grantor: &str, grantee: &str) -> bool {
        self.resource_id == resource_id && self.grantor == grantor && self.grantee == grantee
    }
}

/// Data required to create a share record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewShareRecord {
    /// ID of the resource.
    pub resource_id: String,
    /// Principal issuing the share.
    pub grantor: String,
    /// Principal receiving the share.
    pub grantee: String,
    /// Permission level.
    pub permission: SharePermission,
}

impl NewShareRecord {
    /// Build a new record description.
    pub fn new(
        resource_id: impl Into<String>,
        grantor: impl Into<String>,
        grantee: impl Into<String>,
        permission: SharePermission,
    ) -> Self {
        Self {
            resource_id: resource_id.into(),
            grantor: grantor.into(),
            grantee: grantee.into(),
            permission,
        }
    }

    /// Check field bounds against the column sizes.
    pub fn validate(&self) -> Result<(), AppError> {
        validate_resource_id(&self.resource_id)?;
        validate_principal("grantor", &self.grantor)?;
        validate_principal("grantee", &self.grantee)
    }
}

/// Reject empty or over-long resource identifiers.
pub fn validate_resource_id(resource_id: &str) -> Result<(), AppError> {
    if resource_id.is_empty() {
        return Err(AppError::validation("resource_id must not be empty"));
    }
    if resource_id.chars().count() > MAX_RESOURCE_ID_LEN {
        return Err(AppError::validation(format!(
            "resource_id exceeds {MAX_RESOURCE_ID_LEN} characters"
        )));
    }
    Ok(())
}

/// Reject empty or over-long principal identifiers.
pub fn validate_principal(field: &str, principal: &str) -> Result<(), AppError> {
    if principal.is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    if principal.chars().count() > MAX_PRINCIPAL_LEN {
        return Err(AppError::validation(format!(
            "{field} exceeds {MAX_PRINCIPAL_LEN} characters"
        )));
    }
    Ok(())
}
