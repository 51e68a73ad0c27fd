//! Repository implementations backed by PostgreSQL.

pub mod share_permission;

pub use share_permission::SharePermissionRepository;
