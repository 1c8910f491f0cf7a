//! Mail delivery worker

use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

use super::{ContactMessage, MailOutbox, Mailer};

/// Delay before the second attempt; doubles after each failure
const INITIAL_BACKOFF: Duration = Duration::from_millis(500);

/// Delivers queued contact messages until shutdown
pub struct MailWorker {
    mailer: Arc<dyn Mailer>,
    max_attempts: u32,
    initial_backoff: Duration,
}

impl MailWorker {
    pub fn new(mailer: Arc<dyn Mailer>, max_attempts: u32) -> Self {
        Self {
            mailer,
            max_attempts: max_attempts.max(1),
            initial_backoff: INITIAL_BACKOFF,
        }
    }

    pub fn with_backoff(mut self, initial_backoff: Duration) -> Self {
        self.initial_backoff = initial_backoff;
        self
    }

    /// Run until the token is cancelled or every queue handle is dropped
    pub async fn run(self, mut outbox: MailOutbox, shutdown: CancellationToken) {
        tracing::info!(max_attempts = self.max_attempts, "Mail worker started");

        loop {
            tokio::select! {
                _ = shutdown.cancelled() => {
                    tracing::info!("Mail worker received shutdown signal");
                    break;
                }
                message = outbox.rx.recv() => {
                    let Some(message) = message else {
                        tracing::info!("Mail queue closed, mail worker stopping");
                        break;
                    };
                    self.deliver(&message, &shutdown).await;
                }
            }
        }

        // Anything still queued will not be sent
        outbox.rx.close();
        while let Ok(message) = outbox.rx.try_recv() {
            dead_letter(&message, 0, "shutdown");
        }
    }

    /// Deliver one message with retries. Returns whether it was sent.
    async fn deliver(&self, message: &ContactMessage, shutdown: &CancellationToken) -> bool {
        let mut backoff = self.initial_backoff;

        for attempt in 1..=self.max_attempts {
            match self.mailer.send(message).await {
                Ok(()) => {
                    tracing::info!(
                        target: "mail",
                        from = %message.email,
                        attempt,
                        "Contact notification sent"
                    );
                    return true;
                }
                Err(e) if attempt == self.max_attempts => {
                    dead_letter(message, attempt, &e.to_string());
                    return false;
                }
                Err(e) => {
                    tracing::warn!(
                        target: "mail",
                        attempt,
                        error = %e,
                        retry_in_ms = backoff.as_millis() as u64,
                        "Mail delivery failed, retrying"
                    );
                    tokio::select! {
                        _ = shutdown.cancelled() => {
                            dead_letter(message, attempt, "shutdown");
                            return false;
                        }
                        _ = tokio::time::sleep(backoff) => {}
                    }
                    backoff = backoff.saturating_mul(2);
                }
            }
        }
        false
    }
}

fn dead_letter(message: &ContactMessage, attempts: u32, reason: &str) {
    tracing::error!(
        target: "mail_dead_letter",
        attempts,
        reason,
        name = %message.name,
        email = %message.email,
        subject = %message.subject,
        body = %message.message,
        "Contact notification undeliverable"
    );
}
