//! Server configuration for Leadline.
//!
//! Loads configuration from environment variables with sensible defaults.
//! Loading never fails: missing mail secrets leave the server running, and
//! every lead request then answers 500 until the deployment is fixed.

use std::fmt;
use std::net::SocketAddr;

use chrono_tz::Tz;
use leadline_core::notify::Brand;

/// Default Resend API base URL.
pub const DEFAULT_RESEND_API_URL: &str = "https://api.resend.com";

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind the HTTP listener to.
    pub bind_addr: SocketAddr,
    /// Log level filter (e.g., `info`, `debug`, `warn`).
    pub log_level: String,
    /// Mail provider credentials and recipients.
    pub mail: MailConfig,
    /// Zone used for the timestamp shown in notifications.
    pub timezone: Tz,
    /// Branding applied to the notification email.
    pub brand: Brand,
}

/// Mail delivery configuration.
#[derive(Clone)]
pub struct MailConfig {
    /// Resend API key. Required to send.
    pub resend_api_key: Option<String>,
    /// Destination address for lead notifications. Required to send.
    pub to_email: Option<String>,
    /// Blind-copy recipients.
    pub bcc: Vec<String>,
    /// Resend API base URL.
    pub api_url: String,
    /// Outbound request timeout in seconds.
    pub timeout_secs: u64,
}

impl fmt::Debug for MailConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MailConfig")
            .field(
                "resend_api_key",
                &self.resend_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("to_email", &self.to_email)
            .field("bcc", &self.bcc)
            .field("api_url", &self.api_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl MailConfig {
    /// Names of the required variables that are not set.
    pub fn missing(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.resend_api_key.is_none() {
            missing.push("RESEND_API_KEY");
        }
        if self.to_email.is_none() {
            missing.push("LEAD_TO_EMAIL");
        }
        missing
    }
}

/// Split a comma-separated address list, trimming entries and dropping blanks.
pub fn parse_address_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_owned)
        .collect()
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `LEADLINE_BIND_ADDR`: full bind address (overrides `PORT`, default: `127.0.0.1:3000`)
    /// - `PORT`: port to bind on `0.0.0.0` (platform convention)
    /// - `LEADLINE_LOG_LEVEL`: log filter (default: `info`)
    /// - `RESEND_API_KEY`: Resend API key (required to send)
    /// - `LEAD_TO_EMAIL`: notification destination (required to send)
    /// - `LEADS_BCC_EMAIL`: comma-separated blind-copy list (optional)
    /// - `RESEND_API_URL`: provider base URL (default: `https://api.resend.com`)
    /// - `LEADLINE_MAIL_TIMEOUT_SECS`: outbound timeout (default: `10`)
    /// - `LEADLINE_TIMEZONE`: IANA zone for timestamps (default: `America/Chicago`)
    /// - `LEADLINE_BUSINESS_NAME`, `LEADLINE_ACCENT_COLOR`, `LEADLINE_FROM`,
    ///   `LEADLINE_POWERED_BY`: email branding
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).map(|v| v.trim().to_owned()).filter(|v| !v.is_empty());

        // Priority: LEADLINE_BIND_ADDR > PORT > default 127.0.0.1:3000
        let default_addr = SocketAddr::from(([127, 0, 0, 1], 3000));
        let bind_addr = if let Some(addr) = var("LEADLINE_BIND_ADDR") {
            addr.parse().unwrap_or(default_addr)
        } else if let Some(port) = var("PORT") {
            let port: u16 = port.parse().unwrap_or(3000);
            SocketAddr::from(([0, 0, 0, 0], port))
        } else {
            default_addr
        };

        let log_level = var("LEADLINE_LOG_LEVEL").unwrap_or_else(|| "info".to_owned());

        let mail = MailConfig {
            resend_api_key: var("RESEND_API_KEY"),
            to_email: var("LEAD_TO_EMAIL"),
            bcc: var("LEADS_BCC_EMAIL")
                .map(|v| parse_address_list(&v))
                .unwrap_or_default(),
            api_url: var("RESEND_API_URL")
                .unwrap_or_else(|| DEFAULT_RESEND_API_URL.to_owned())
                .trim_end_matches('/')
                .to_owned(),
            timeout_secs: var("LEADLINE_MAIL_TIMEOUT_SECS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
        };

        let timezone = var("LEADLINE_TIMEZONE")
            .and_then(|v| v.parse::<Tz>().ok())
            .unwrap_or(chrono_tz::America::Chicago);

        let business_name =
            var("LEADLINE_BUSINESS_NAME").unwrap_or_else(|| "Landeros Electrical".to_owned());
        let brand = Brand {
            from: var("LEADLINE_FROM")
                .unwrap_or_else(|| format!("{business_name} | New Lead <leads@quicklaunchweb.us>")),
            accent_color: var("LEADLINE_ACCENT_COLOR").unwrap_or_else(|| "#3b82f6".to_owned()),
            powered_by: var("LEADLINE_POWERED_BY").unwrap_or_else(|| "QuickLaunchWeb".to_owned()),
            business_name,
        };

        Self {
            bind_addr,
            log_level,
            mail,
            timezone,
            brand,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(pairs: &[(&str, &str)]) -> ServerConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        ServerConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_without_env() {
        let cfg = load(&[]);
        assert_eq!(cfg.bind_addr, SocketAddr::from(([127, 0, 0, 1], 3000)));
        assert_eq!(cfg.log_level, "info");
        assert_eq!(cfg.timezone, chrono_tz::America::Chicago);
        assert_eq!(cfg.mail.api_url, DEFAULT_RESEND_API_URL);
        assert_eq!(cfg.mail.missing(), vec!["RESEND_API_KEY", "LEAD_TO_EMAIL"]);
        assert_eq!(
            cfg.brand.from,
            "Landeros Electrical | New Lead <leads@quicklaunchweb.us>"
        );
    }

    #[test]
    fn port_binds_all_interfaces() {
        let cfg = load(&[("PORT", "8080")]);
        assert_eq!(cfg.bind_addr, SocketAddr::from(([0, 0, 0, 0], 8080)));
    }

    #[test]
    fn bind_addr_overrides_port() {
        let cfg = load(&[("PORT", "8080"), ("LEADLINE_BIND_ADDR", "127.0.0.1:9000")]);
        assert_eq!(cfg.bind_addr, SocketAddr::from(([127, 0, 0, 1], 9000)));
    }

    #[test]
    fn empty_secrets_count_as_missing() {
        let cfg = load(&[("RESEND_API_KEY", "  "), ("LEAD_TO_EMAIL", "owner@example.com")]);
        assert_eq!(cfg.mail.missing(), vec!["RESEND_API_KEY"]);
    }

    #[test]
    fn bcc_list_is_split_and_trimmed() {
        let cfg = load(&[("LEADS_BCC_EMAIL", " a@example.com, ,b@example.com ,")]);
        assert_eq!(cfg.mail.bcc, vec!["a@example.com", "b@example.com"]);
    }

    #[test]
    fn unknown_timezone_falls_back() {
        let cfg = load(&[("LEADLINE_TIMEZONE", "Mars/Olympus")]);
        assert_eq!(cfg.timezone, chrono_tz::America::Chicago);
        let cfg = load(&[("LEADLINE_TIMEZONE", "America/Denver")]);
        assert_eq!(cfg.timezone, chrono_tz::America::Denver);
    }

    #[test]
    fn brand_from_follows_business_name() {
        let cfg = load(&[("LEADLINE_BUSINESS_NAME", "Ironside Fence & Weld")]);
        assert_eq!(
            cfg.brand.from,
            "Ironside Fence & Weld | New Lead <leads@quicklaunchweb.us>"
        );
    }

    #[test]
    fn debug_redacts_api_key() {
        let cfg = load(&[("RESEND_API_KEY", "re_secret")]);
        let rendered = format!("{:?}", cfg.mail);
        assert!(!rendered.contains("re_secret"));
        assert!(rendered.contains("[redacted]"));
    }
}
