//! Permission level carried by a share record.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Permission level granted by a share.
///
/// Persisted as the short codes `r`, `rw` and `admin`. An `admin` grantee
/// may manage sharing of the resource on behalf of the grantor that
/// promoted it.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum SharePermission {
    /// Read-only access.
    #[serde(rename = "r", alias = "read")]
    Read,
    /// Read and write access.
    #[default]
    #[serde(rename = "rw", alias = "read-write")]
    ReadWrite,
    /// Read-write access plus the right to manage sharing.
    #[serde(rename = "admin")]
    Admin,
}

impl SharePermission {
    /// Every known permission level, lowest first.
    pub const ALL: [SharePermission; 3] = [Self::Read, Self::ReadWrite, Self::Admin];

    /// Return the storage code for this permission.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Read => "r",
            Self::ReadWrite => "rw",
            Self::Admin => "admin",
        }
    }

    /// Whether the grantee becomes an administrator of the resource.
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }
}

impl fmt::Display for SharePermission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for SharePermission {
    type Err = sharehub_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "r" | "read" => Ok(Self::Read),
            "rw" | "read-write" => Ok(Self::ReadWrite),
            "admin" => Ok(Self::Admin),
            _ => Err(sharehub_core::AppError::validation(format!(
                "Invalid share permission: '{s}'"
            ))),
        }
    }
}

impl TryFrom<String> for SharePermission {
    type Error = sharehub_core::AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
