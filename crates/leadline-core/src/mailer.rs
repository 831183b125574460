//! Email delivery abstraction.
//!
//! The [`Mailer`] trait is the only seam between lead intake and the outside
//! world. The server ships a Resend implementation; [`MemoryMailer`] captures
//! messages in memory for tests and local development.

use std::sync::Mutex;

use serde::Serialize;

use crate::error::MailError;

/// A fully composed outbound message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Email {
    pub from: String,
    pub to: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub bcc: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_to: Option<String>,
    pub subject: String,
    pub text: String,
    pub html: String,
}

/// Sends a composed [`Email`].
///
/// Implementations must be safe to share across async tasks (`Send + Sync`).
/// A call is attempted exactly once; retrying is the caller's decision.
#[async_trait::async_trait]
pub trait Mailer: Send + Sync + 'static {
    /// Deliver one message.
    ///
    /// # Errors
    ///
    /// Returns [`MailError`] if the provider rejects the message or cannot be
    /// reached.
    async fn send(&self, email: &Email) -> Result<(), MailError>;
}

/// In-memory mailer that records every message it is asked to send.
#[derive(Debug, Default)]
pub struct MemoryMailer {
    sent: Mutex<Vec<Email>>,
    fail: bool,
}

impl MemoryMailer {
    /// A mailer that accepts everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// A mailer that records the attempt and then fails it.
    pub fn failing() -> Self {
        Self {
            sent: Mutex::default(),
            fail: true,
        }
    }

    /// Every message passed to [`Mailer::send`] so far.
    pub fn sent(&self) -> Vec<Email> {
        self.sent
            .lock()
            .map(|sent| sent.clone())
            .unwrap_or_default()
    }
}

#[async_trait::async_trait]
impl Mailer for MemoryMailer {
    async fn send(&self, email: &Email) -> Result<(), MailError> {
        if let Ok(mut sent) = self.sent.lock() {
            sent.push(email.clone());
        }
        if self.fail {
            return Err(MailError::Provider {
                status: 503,
                message: "memory mailer configured to fail".to_owned(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn email() -> Email {
        Email {
            from: "Leads <leads@example.com>".to_owned(),
            to: vec!["owner@example.com".to_owned()],
            bcc: Vec::new(),
            reply_to: Some("dana@example.com".to_owned()),
            subject: "New lead".to_owned(),
            text: "hi".to_owned(),
            html: "<p>hi</p>".to_owned(),
        }
    }

    #[tokio::test]
    async fn memory_mailer_records() {
        let mailer = MemoryMailer::new();
        mailer.send(&email()).await.unwrap();
        assert_eq!(mailer.sent(), vec![email()]);
    }

    #[tokio::test]
    async fn failing_mailer_records_attempt() {
        let mailer = MemoryMailer::failing();
        let err = mailer.send(&email()).await.unwrap_err();
        assert!(matches!(err, MailError::Provider { status: 503, .. }));
        assert_eq!(mailer.sent().len(), 1);
    }

    #[test]
    fn empty_bcc_is_omitted_from_payload() {
        let json = serde_json::to_value(email()).unwrap();
        assert!(json.get("bcc").is_none());
        assert_eq!(json["reply_to"], "dana@example.com");
    }
}
