//! Resend delivery backend.
//!
//! Posts composed messages to Resend's `POST /emails` endpoint with bearer
//! authentication. Any 2xx answer is success; everything else maps to a
//! [`MailError`]. One attempt per message, no retries.

use std::time::Duration;

use leadline_core::error::MailError;
use leadline_core::mailer::{Email, Mailer};
use serde::Deserialize;
use tracing::debug;

/// Error payload Resend returns on rejection.
#[derive(Debug, Deserialize)]
struct ResendErrorBody {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// Success payload: the id Resend assigned to the message.
#[derive(Debug, Deserialize)]
struct ResendSent {
    id: String,
}

/// [`Mailer`] backed by the Resend HTTP API.
#[derive(Clone)]
pub struct ResendMailer {
    client: reqwest::Client,
    api_key: String,
    endpoint: String,
}

impl std::fmt::Debug for ResendMailer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResendMailer")
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

impl ResendMailer {
    /// Create a mailer for the given API base URL (e.g. `https://api.resend.com`).
    ///
    /// # Errors
    ///
    /// Returns [`MailError::Transport`] if the HTTP client cannot be built.
    pub fn new(api_key: String, base_url: &str, timeout: Duration) -> Result<Self, MailError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("leadline/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| MailError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            api_key,
            endpoint: format!("{}/emails", base_url.trim_end_matches('/')),
        })
    }
}

#[async_trait::async_trait]
impl Mailer for ResendMailer {
    async fn send(&self, email: &Email) -> Result<(), MailError> {
        let payload = serde_json::to_vec(email)?;

        let resp = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(payload)
            .send()
            .await
            .map_err(|e| MailError::Transport(e.to_string()))?;

        let status = resp.status();
        if status.is_success() {
            if let Ok(sent) = resp.json::<ResendSent>().await {
                debug!(id = %sent.id, "resend accepted message");
            }
            return Ok(());
        }

        let message = match resp.json::<ResendErrorBody>().await {
            Ok(body) => match (body.name, body.message) {
                (Some(name), Some(message)) => format!("{name}: {message}"),
                (None, Some(message)) => message,
                (Some(name), None) => name,
                (None, None) => "no error detail".to_owned(),
            },
            Err(_) => "unreadable error body".to_owned(),
        };

        Err(MailError::Provider {
            status: status.as_u16(),
            message,
        })
    }
}
