//! HTTP error types for the Leadline server.
//!
//! Maps intake and mail errors into the endpoint's response shape
//! `{ "ok": false, "error": "..." }`. Server-side failures log their detail
//! and return a generic message.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use leadline_core::error::{ComposeError, IntakeError, MailError};

/// Application-level error returned from HTTP handlers.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// The request body could not be parsed.
    #[error("malformed body: {0}")]
    MalformedBody(String),

    /// The submission failed validation.
    #[error(transparent)]
    Invalid(#[from] IntakeError),

    /// Required mail settings are absent.
    #[error("server misconfigured, missing {}", .missing.join(", "))]
    Misconfigured { missing: Vec<&'static str> },

    /// The notification could not be rendered.
    #[error("compose failed: {0}")]
    Compose(#[from] ComposeError),

    /// The provider call failed.
    #[error("delivery failed: {0}")]
    Delivery(#[from] MailError),
}

/// JSON body shared by every lead endpoint response.
#[derive(Debug, Serialize)]
pub struct LeadResponse {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl LeadResponse {
    pub fn ok() -> Self {
        Self {
            ok: true,
            error: None,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            error: Some(message.into()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::MalformedBody(reason) => {
                tracing::debug!(reason = %reason, "rejected unparseable lead body");
                (StatusCode::BAD_REQUEST, "Invalid request body.".to_owned())
            }
            Self::Invalid(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            Self::Misconfigured { missing } => {
                tracing::error!(missing = ?missing, "lead mail settings are not configured");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Server misconfigured.".to_owned(),
                )
            }
            Self::Compose(err) => {
                tracing::error!(error = %err, "lead notification could not be composed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to send email.".to_owned(),
                )
            }
            Self::Delivery(err) => {
                tracing::error!(error = %err, "lead notification delivery failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to send email.".to_owned(),
                )
            }
        };

        (status, Json(LeadResponse::failed(message))).into_response()
    }
}
