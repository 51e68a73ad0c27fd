//! Share-permission records and permission levels.

pub mod model;
pub mod permission;

pub use model::{
    MAX_PRINCIPAL_LEN, MAX_RESOURCE_ID_LEN, NewShareRecord, ShareRecord, validate_principal,
    validate_resource_id,
};
pub use permission::SharePermission;
