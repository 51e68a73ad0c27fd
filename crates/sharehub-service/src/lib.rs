//! # sharehub-service
//!
//! Service layer for ShareHub. The [`SharingRegistry`] answers admin and
//! permission queries over share-permission records; the
//! [`BatchShareService`] shares many resources with one user at once.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references.

pub mod context;
pub mod directory;
pub mod registry;
pub mod share;

pub use context::RequestContext;
pub use directory::{GroupDirectory, GroupShares, ResourceDirectory, UserDirectory};
pub use registry::SharingRegistry;
pub use share::{BatchShareRequest, BatchShareResult, BatchShareService};
