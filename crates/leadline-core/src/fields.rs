//! Alias-based field extraction.
//!
//! Landing pages built at different times name their inputs differently
//! (`phone`, `phoneNumber`, `tel`, ...). Each logical field owns an ordered
//! list of accepted keys; the first key whose normalized value is non-empty
//! wins.

use std::collections::HashMap;

/// Raw submitted fields after body parsing. Only string values survive.
pub type RawFields = HashMap<String, String>;

/// A logical lead field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LeadField {
    Honeypot,
    Name,
    Phone,
    Email,
    Message,
    Company,
    Service,
    Page,
    Site,
}

impl LeadField {
    /// Accepted keys for this field, highest priority first.
    pub const fn aliases(self) -> &'static [&'static str] {
        match self {
            Self::Honeypot => &["website"],
            Self::Name => &["name", "fullName", "fullname"],
            Self::Phone => &["phone", "phoneNumber", "phone_number", "tel"],
            Self::Email => &["email", "emailAddress", "email_address"],
            Self::Message => &["message", "details", "notes"],
            Self::Company => &["company", "companyName", "company_name"],
            Self::Service => &["service", "serviceNeeded", "service_needed"],
            Self::Page => &["page", "pageUrl", "page_url"],
            Self::Site => &["site", "siteUrl", "site_url"],
        }
    }

    /// Short name used in logs and validation errors.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Honeypot => "honeypot",
            Self::Name => "name",
            Self::Phone => "phone",
            Self::Email => "email",
            Self::Message => "message",
            Self::Company => "company",
            Self::Service => "service",
            Self::Page => "page",
            Self::Site => "site",
        }
    }
}

/// Collapse CRLF to LF and trim surrounding whitespace.
pub fn normalize(value: &str) -> String {
    value.replace("\r\n", "\n").trim().to_owned()
}

/// Return the first non-empty normalized value among the field's aliases,
/// or an empty string when none is present.
pub fn pick(raw: &RawFields, field: LeadField) -> String {
    field
        .aliases()
        .iter()
        .filter_map(|key| raw.get(*key))
        .map(|value| normalize(value))
        .find(|value| !value.is_empty())
        .unwrap_or_default()
}

/// Flatten a decoded JSON body into [`RawFields`].
///
/// A non-object body yields an empty map. Non-string members are dropped,
/// which makes them indistinguishable from absent keys.
pub fn from_json(value: serde_json::Value) -> RawFields {
    match value {
        serde_json::Value::Object(map) => map
            .into_iter()
            .filter_map(|(key, value)| match value {
                serde_json::Value::String(s) => Some((key, s)),
                _ => None,
            })
            .collect(),
        _ => RawFields::new(),
    }
}
