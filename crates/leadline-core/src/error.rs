//! Error types for `leadline-core`.
//!
//! Validation errors carry the exact human-readable reason returned to the
//! submitter. Compose and mail errors carry provider detail for the logs only; the HTTP
//! layer never forwards it to the caller.

/// Errors from validating a lead submission.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IntakeError {
    /// One or more of name, phone, email, service is empty.
    #[error("Please provide your name, phone, email, and service needed.")]
    MissingRequired {
        /// Logical names of the missing fields, in table order.
        missing: Vec<&'static str>,
    },

    /// The free-text message exceeds the length bound.
    #[error("Message is too long. Please keep it under {max} characters.")]
    MessageTooLong { max: usize, actual: usize },
}

/// Errors from composing a notification.
#[derive(Debug, thiserror::Error)]
pub enum ComposeError {
    #[error("template render failed: {0}")]
    Render(#[from] askama::Error),
}

/// Errors from delivering a notification email.
#[derive(Debug, thiserror::Error)]
pub enum MailError {
    /// The provider answered with a non-success status.
    #[error("mail provider rejected message ({status}): {message}")]
    Provider { status: u16, message: String },

    /// The request never produced a provider response (DNS, TLS, timeout).
    #[error("mail transport error: {0}")]
    Transport(String),

    /// The message could not be encoded for the provider.
    #[error("mail encoding error: {0}")]
    Encode(#[from] serde_json::Error),
}
