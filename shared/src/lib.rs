//! Shared types for the bakery storefront
//!
//! Domain models, the unified error system and the list-attribute codec used
//! by the storefront server and its tests.

pub mod attrs;
pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use axum::Json;
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
pub use models::{AdminAccount, CatalogItem, CatalogItemCreate, CategoryCount};
