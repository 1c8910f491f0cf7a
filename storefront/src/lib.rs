//! Bakery storefront
//!
//! Catalog browsing, product detail pages with an order deep link, a contact
//! form and an admin panel for managing the catalog and its images.
//!
//! ```text
//! storefront/src/
//! ├── core/      # config, state, server, background tasks
//! ├── api/       # HTTP routes and view models
//! ├── auth/      # password check, session cookie, admin gate
//! ├── catalog/   # admin add/edit/delete workflow
//! ├── db/        # SQLite pool, migrations, repositories
//! ├── ingest/    # image uploads and remote downloads
//! ├── mail/      # contact notification queue and delivery
//! ├── seed/      # bootstrap admin and demo catalog
//! └── utils/     # logging, validation, deep links
//! ```

pub mod api;
pub mod auth;
pub mod catalog;
pub mod core;
pub mod db;
pub mod ingest;
pub mod mail;
pub mod seed;
pub mod utils;

pub use core::{Config, Server, ServerState};
pub use shared::{ApiResponse, AppError, AppResult, ErrorCode};
pub use utils::logger::init_logger_with_file;

/// Security event log (target `security`)
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}
