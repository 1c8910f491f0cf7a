//! HTTP mail relay

use async_trait::async_trait;
use serde::Serialize;

use super::{ContactMessage, MailError, Mailer};

/// Posts notifications as JSON to a transactional mail relay
#[derive(Debug, Clone)]
pub struct RelayMailer {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
    from: String,
    to: String,
}

#[derive(Serialize)]
struct RelayPayload<'a> {
    from: &'a str,
    to: &'a str,
    reply_to: &'a str,
    subject: String,
    text: String,
}

impl RelayMailer {
    pub fn new(
        client: reqwest::Client,
        endpoint: impl Into<String>,
        api_key: Option<String>,
        from: impl Into<String>,
        to: impl Into<String>,
    ) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            api_key,
            from: from.into(),
            to: to.into(),
        }
    }
}

#[async_trait]
impl Mailer for RelayMailer {
    async fn send(&self, message: &ContactMessage) -> Result<(), MailError> {
        let payload = RelayPayload {
            from: &self.from,
            to: &self.to,
            reply_to: &message.email,
            subject: message.mail_subject(),
            text: message.mail_body(),
        };

        let mut request = self.client.post(&self.endpoint).json(&payload);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(MailError::Rejected { status });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mail::testing::message;
    use axum::routing::post;
    use axum::{Json, Router};
    use std::sync::{Arc, Mutex};

    async fn relay(record: Arc<Mutex<Vec<serde_json::Value>>>, status: http::StatusCode) -> String {
        let app = Router::new().route(
            "/send",
            post(
                move |headers: http::HeaderMap, Json(body): Json<serde_json::Value>| {
                    let record = record.clone();
                    async move {
                        let auth = headers
                            .get(http::header::AUTHORIZATION)
                            .and_then(|v| v.to_str().ok())
                            .unwrap_or_default()
                            .to_string();
                        record
                            .lock()
                            .unwrap()
                            .push(serde_json::json!({ "auth": auth, "body": body }));
                        status
                    }
                },
            ),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });
        format!("http://{addr}/send")
    }

    #[tokio::test]
    async fn test_relay_posts_json_with_bearer_key() {
        let record = Arc::new(Mutex::new(Vec::new()));
        let endpoint = relay(record.clone(), http::StatusCode::ACCEPTED).await;
        let mailer = RelayMailer::new(
            reqwest::Client::new(),
            endpoint,
            Some("key-123".into()),
            "shop@example.com",
            "owner@example.com",
        );

        mailer.send(&message()).await.unwrap();

        let calls = record.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0]["auth"], "Bearer key-123");
        assert_eq!(calls[0]["body"]["subject"], "New Message: Wedding cake");
        assert_eq!(calls[0]["body"]["reply_to"], "ada@example.com");
        assert_eq!(calls[0]["body"]["to"], "owner@example.com");
    }

    #[tokio::test]
    async fn test_relay_error_status_is_rejected() {
        let record = Arc::new(Mutex::new(Vec::new()));
        let endpoint = relay(record, http::StatusCode::INTERNAL_SERVER_ERROR).await;
        let mailer = RelayMailer::new(reqwest::Client::new(), endpoint, None, "a", "b");

        let err = mailer.send(&message()).await.unwrap_err();
        assert!(matches!(err, MailError::Rejected { status } if status.as_u16() == 500));
    }
}
