//! # sharehub-entity
//!
//! Domain entity models for ShareHub. Database rows derive
//! `sqlx::FromRow`; every entity derives `Debug`, `Clone`, `Serialize`
//! and `Deserialize`.

pub mod share;

pub use share::{NewShareRecord, SharePermission, ShareRecord};
