//! Data models
//!
//! Shared between the storefront server and its tests.
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` (SQLite INTEGER PRIMARY KEY).

pub mod admin;
pub mod catalog_item;

// Re-exports
pub use admin::*;
pub use catalog_item::*;
