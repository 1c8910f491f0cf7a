//! Server core: configuration, state, background tasks and the HTTP server
//!
//! - [`Config`] - environment configuration
//! - [`ServerState`] - state shared by handlers
//! - [`Server`] - start-up sequence and listener
//! - [`BackgroundTasks`] - task registry with graceful shutdown

pub mod config;
pub mod error;
pub mod server;
pub mod state;
pub mod tasks;

pub use config::Config;
pub use error::{Result, ServerError};
pub use server::Server;
pub use state::ServerState;
pub use tasks::{BackgroundTasks, TaskKind};
