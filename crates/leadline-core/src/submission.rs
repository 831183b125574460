//! The transient lead entity and its validation rules.

use crate::error::IntakeError;
use crate::fields::{self, LeadField, RawFields};

/// Upper bound on the free-text message, in UTF-16 code units (the unit a
/// browser `maxlength` counts).
pub const MAX_MESSAGE_LENGTH: usize = 5000;

/// A single form submission, normalized but not yet validated.
///
/// Lives for one request only and is never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeadSubmission {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub service: String,
    pub message: Option<String>,
    pub company: Option<String>,
    pub page: Option<String>,
    pub site: Option<String>,
    /// Decoy input hidden from humans.
    pub honeypot: String,
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() { None } else { Some(value) }
}

impl LeadSubmission {
    /// Extract every logical field from the raw map via the alias table.
    pub fn from_fields(raw: &RawFields) -> Self {
        let pick = |field| fields::pick(raw, field);
        Self {
            name: pick(LeadField::Name),
            phone: pick(LeadField::Phone),
            email: pick(LeadField::Email),
            service: pick(LeadField::Service),
            message: non_empty(pick(LeadField::Message)),
            company: non_empty(pick(LeadField::Company)),
            page: non_empty(pick(LeadField::Page)),
            site: non_empty(pick(LeadField::Site)),
            honeypot: pick(LeadField::Honeypot),
        }
    }

    /// Whether the decoy field was filled in.
    pub fn is_spam(&self) -> bool {
        !self.honeypot.is_empty()
    }

    /// Check required fields and the message bound.
    ///
    /// # Errors
    ///
    /// Returns [`IntakeError::MissingRequired`] if any of name, phone, email,
    /// service is empty, or [`IntakeError::MessageTooLong`] if the message
    /// exceeds [`MAX_MESSAGE_LENGTH`] UTF-16 code units.
    pub fn validate(&self) -> Result<(), IntakeError> {
        let missing: Vec<&'static str> = [
            (LeadField::Name, &self.name),
            (LeadField::Phone, &self.phone),
            (LeadField::Email, &self.email),
            (LeadField::Service, &self.service),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(field, _)| field.as_str())
        .collect();

        if !missing.is_empty() {
            return Err(IntakeError::MissingRequired { missing });
        }

        if let Some(message) = &self.message {
            let actual = message.encode_utf16().count();
            if actual > MAX_MESSAGE_LENGTH {
                return Err(IntakeError::MessageTooLong {
                    max: MAX_MESSAGE_LENGTH,
                    actual,
                });
            }
        }

        Ok(())
    }
}
