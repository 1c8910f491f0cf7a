//! Shared server state

use sqlx::SqlitePool;
use std::sync::Arc;

use super::{Config, Result};
use crate::auth::SessionService;
use crate::db::DbService;
use crate::ingest::ImageStore;
use crate::mail::MailQueue;

/// State handed to every handler.
///
/// Cloning is cheap: the pool, the HTTP client and the queue sender are all
/// handles.
#[derive(Clone, Debug)]
pub struct ServerState {
    pub config: Config,
    pub pool: SqlitePool,
    pub images: ImageStore,
    pub sessions: Arc<SessionService>,
    pub mail: MailQueue,
}

impl ServerState {
    /// Open the database (running migrations), prepare the content directory
    /// and the session signer.
    pub async fn initialize(config: &Config, mail: MailQueue) -> Result<Self> {
        let db = DbService::new(&config.database_path).await?;
        let images = ImageStore::new(&config.upload_dir, config.fetch_timeout)?;
        let sessions = SessionService::new(&config.session_secret, config.is_production());

        tracing::info!(
            uploads = %config.upload_dir.display(),
            environment = %config.environment,
            "Server state initialized"
        );

        Ok(Self {
            config: config.clone(),
            pool: db.pool,
            images,
            sessions: Arc::new(sessions),
            mail,
        })
    }
}
