//! Shared application state for the Leadline server.
//!
//! A single [`AppState`] is constructed at startup and shared across all Axum
//! handlers via `Arc`. It is read-only after construction; requests share
//! nothing mutable.

use std::sync::Arc;

use chrono_tz::Tz;
use leadline_core::mailer::Mailer;
use leadline_core::notify::Brand;

use crate::config::{MailConfig, ServerConfig};

/// Shared application state passed to all HTTP handlers.
pub struct AppState {
    /// Delivery backend. `None` when no provider key is configured.
    pub mailer: Option<Arc<dyn Mailer>>,
    /// Recipients and provider settings.
    pub mail: MailConfig,
    /// Branding for the notification email.
    pub brand: Brand,
    /// Zone used for notification timestamps.
    pub timezone: Tz,
}

impl AppState {
    /// Build state from loaded configuration and an optional mailer.
    pub fn new(config: &ServerConfig, mailer: Option<Arc<dyn Mailer>>) -> Self {
        Self {
            mailer,
            mail: config.mail.clone(),
            brand: config.brand.clone(),
            timezone: config.timezone,
        }
    }

    /// Whether a lead can be delivered with the current settings.
    pub fn mail_configured(&self) -> bool {
        self.mailer.is_some() && self.mail.missing().is_empty()
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("mail", &self.mail)
            .field("brand", &self.brand)
            .field("timezone", &self.timezone)
            .finish_non_exhaustive()
    }
}
