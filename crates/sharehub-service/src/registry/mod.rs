//! Sharing-permission registry.

pub mod service;

pub use service::SharingRegistry;
