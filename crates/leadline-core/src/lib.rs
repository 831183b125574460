//! Core library for Leadline.
//!
//! Turns an untrusted landing-page form submission into a validated
//! [`submission::LeadSubmission`] and composes the notification email sent to
//! the business. This crate knows nothing about HTTP servers or a specific
//! email provider; delivery goes through the [`mailer::Mailer`] trait.

pub mod error;
pub mod fields;
pub mod mailer;
pub mod notify;
pub mod phone;
pub mod submission;
