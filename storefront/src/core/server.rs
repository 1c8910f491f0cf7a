//! HTTP server start-up and shutdown

use std::sync::Arc;

use super::{BackgroundTasks, Config, Result, ServerState, TaskKind};
use crate::api;
use crate::mail::{self, LogMailer, MAIL_QUEUE_CAPACITY, MailWorker, Mailer, RelayMailer};
use crate::seed;

pub struct Server {
    config: Config,
}

impl Server {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Initialize state, seed, start the mail worker and serve until Ctrl-C
    pub async fn run(self) -> Result<()> {
        let config = self.config;
        let (queue, outbox) = mail::channel(MAIL_QUEUE_CAPACITY);
        let state = ServerState::initialize(&config, queue).await?;

        seed::seed(&state.pool, &state.images, &config).await?;

        let mut tasks = BackgroundTasks::new();
        let shutdown = tasks.shutdown_token();
        let worker = MailWorker::new(build_mailer(&config, &state), config.mail_max_attempts);
        tasks.spawn("mail_worker", TaskKind::Worker, worker.run(outbox, shutdown));

        let app = api::build_app(&state);
        let addr = format!("0.0.0.0:{}", config.http_port);
        let listener = tokio::net::TcpListener::bind(&addr).await?;
        tracing::info!("Storefront listening on http://{addr}");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tasks.check_health();
        tasks.shutdown().await;
        tracing::info!("Storefront stopped");
        Ok(())
    }
}

fn build_mailer(config: &Config, state: &ServerState) -> Arc<dyn Mailer> {
    match &config.mail_relay_url {
        Some(url) => {
            tracing::info!(relay = %url, "Contact notifications go through the mail relay");
            Arc::new(RelayMailer::new(
                state.images.http_client().clone(),
                url.clone(),
                config.mail_api_key.clone(),
                config.mail_from.clone(),
                config.mail_to.clone(),
            ))
        }
        None => {
            tracing::warn!("MAIL_RELAY_URL not set, contact notifications are only logged");
            Arc::new(LogMailer)
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
