//! Contact notifications
//!
//! The contact handler enqueues a [`ContactMessage`] and answers at once; a
//! [`MailWorker`] owned by the background task registry delivers it through a
//! [`Mailer`] with retries. Messages that never go through end up in the
//! `mail_dead_letter` log target.

mod relay;
mod worker;

pub use relay::RelayMailer;
pub use worker::MailWorker;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;

/// Pending messages before new ones are dropped
pub const MAIL_QUEUE_CAPACITY: usize = 64;

/// A contact form submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl ContactMessage {
    /// Subject line of the notification mail
    pub fn mail_subject(&self) -> String {
        format!("New Message: {}", self.subject)
    }

    /// Plain-text body of the notification mail
    pub fn mail_body(&self) -> String {
        format!(
            "From: {} <{}>\nSubject: {}\n\n{}",
            self.name, self.email, self.subject, self.message
        )
    }
}

#[derive(Debug, Error)]
pub enum MailError {
    #[error("Mail relay request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Mail relay rejected message: {status}")]
    Rejected { status: http::StatusCode },
}

/// Delivers one notification
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, message: &ContactMessage) -> Result<(), MailError>;
}

/// Mailer used when no relay is configured; writes the message to the log
#[derive(Debug, Default)]
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, message: &ContactMessage) -> Result<(), MailError> {
        tracing::info!(
            target: "mail",
            from = %message.email,
            subject = %message.mail_subject(),
            "Contact message received (no mail relay configured)"
        );
        Ok(())
    }
}

/// Sending half of the mail queue, held in the server state
#[derive(Debug, Clone)]
pub struct MailQueue {
    tx: mpsc::Sender<ContactMessage>,
}

impl MailQueue {
    /// Queue a message without waiting. A full or closed queue drops the
    /// message with an error log; the caller is never told.
    pub fn enqueue(&self, message: ContactMessage) {
        match self.tx.try_send(message) {
            Ok(()) => tracing::debug!("Contact message queued"),
            Err(TrySendError::Full(message)) => tracing::error!(
                target: "mail_dead_letter",
                from = %message.email,
                subject = %message.subject,
                "Mail queue full, message dropped"
            ),
            Err(TrySendError::Closed(message)) => tracing::error!(
                target: "mail_dead_letter",
                from = %message.email,
                subject = %message.subject,
                "Mail worker stopped, message dropped"
            ),
        }
    }
}

/// Receiving half, consumed by [`MailWorker::run`]
#[derive(Debug)]
pub struct MailOutbox {
    rx: mpsc::Receiver<ContactMessage>,
}

/// Create a bounded mail queue
pub fn channel(capacity: usize) -> (MailQueue, MailOutbox) {
    let (tx, rx) = mpsc::channel(capacity.max(1));
    (MailQueue { tx }, MailOutbox { rx })
}
