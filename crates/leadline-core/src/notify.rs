//! Notification email composition.
//!
//! Builds the subject line, the plain-text body and the branded HTML body for
//! a validated lead. The HTML layout lives in `templates/lead_notification.html`
//! and is rendered by askama with HTML escaping on, so every user-supplied
//! value (including those placed inside `href` attributes) is inert markup.

use askama::Template;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use crate::error::ComposeError;
use crate::mailer::Email;
use crate::phone::click_to_call;
use crate::submission::LeadSubmission;

/// Per-deployment branding for the notification email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Brand {
    /// Business display name, e.g. `Landeros Electrical`.
    pub business_name: String,
    /// CSS colour used for the header rule, badge and links.
    pub accent_color: String,
    /// Sender mailbox, e.g. `Landeros Electrical | New Lead <leads@...>`.
    pub from: String,
    /// Footer credit line.
    pub powered_by: String,
}

/// A composed notification, ready to be addressed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeadNotification {
    pub subject: String,
    pub text: String,
    pub html: String,
}

impl LeadNotification {
    /// Address the notification. The lead's own email becomes the reply-to.
    pub fn into_email(self, brand: &Brand, to: &str, bcc: &[String], reply_to: &str) -> Email {
        Email {
            from: brand.from.clone(),
            to: vec![to.to_owned()],
            bcc: bcc.to_vec(),
            reply_to: (!reply_to.is_empty()).then(|| reply_to.to_owned()),
            subject: self.subject,
            text: self.text,
            html: self.html,
        }
    }
}

/// Format an instant the way the notification shows it, e.g.
/// `Oct 15, 2026, 3:04 PM CDT`.
pub fn format_timestamp(at: DateTime<Utc>, tz: Tz) -> String {
    at.with_timezone(&tz)
        .format("%b %d, %Y, %-I:%M %p %Z")
        .to_string()
}

/// Whether a page URL points at a local development server.
pub fn is_dev_page(page: &str) -> bool {
    page.to_ascii_lowercase().contains("localhost")
        || page.contains("127.0.0.1")
        || page.contains("0.0.0.0")
}

/// Compose the notification for a validated lead.
///
/// # Errors
///
/// Returns [`ComposeError::Render`] if the HTML template fails to render.
pub fn compose(
    lead: &LeadSubmission,
    brand: &Brand,
    timestamp: &str,
) -> Result<LeadNotification, ComposeError> {
    let page_display = lead.page.as_deref().map(|page| {
        if is_dev_page(page) {
            format!("{page} (dev link)")
        } else {
            page.to_owned()
        }
    });

    Ok(LeadNotification {
        subject: format!("⚡ New Lead ⚡ {} | {}", lead.service, lead.name),
        text: render_text(lead, timestamp, page_display.as_deref()),
        html: LeadNotificationHtml::new(lead, brand, timestamp, page_display.as_deref())
            .render()?,
    })
}

fn render_text(lead: &LeadSubmission, timestamp: &str, page_display: Option<&str>) -> String {
    let mut lines = vec![
        format!("Timestamp: {timestamp}"),
        format!("Name: {}", lead.name),
        format!("Phone: {}", lead.phone),
        format!("Email: {}", lead.email),
    ];
    if let Some(company) = &lead.company {
        lines.push(format!("Company: {company}"));
    }
    lines.push(format!("Service: {}", lead.service));
    if let Some(page) = page_display {
        lines.push(format!("Page: {page}"));
    }
    if let Some(site) = &lead.site {
        lines.push(format!("Site: {site}"));
    }
    lines.push(format!(
        "Message:\n{}",
        lead.message.as_deref().unwrap_or("(none)")
    ));
    lines.join("\n")
}

/// HTML body of the notification. Values are escaped by the template engine.
#[derive(Template)]
#[template(path = "lead_notification.html")]
struct LeadNotificationHtml<'a> {
    business: &'a str,
    accent: &'a str,
    powered_by: &'a str,
    timestamp: &'a str,
    name: &'a str,
    phone: &'a str,
    email: &'a str,
    service: &'a str,
    tel: String,
    mailto: String,
    page: Option<&'a str>,
    page_display: &'a str,
    site: Option<&'a str>,
    company: Option<&'a str>,
    message_lines: Vec<&'a str>,
}

impl<'a> LeadNotificationHtml<'a> {
    fn new(
        lead: &'a LeadSubmission,
        brand: &'a Brand,
        timestamp: &'a str,
        page_display: Option<&'a str>,
    ) -> Self {
        let phone_link = click_to_call(&lead.phone);
        // No digits at all: link the raw text rather than an empty `tel:`.
        let tel = if phone_link.is_empty() {
            format!("tel:{}", lead.phone)
        } else {
            format!("tel:{phone_link}")
        };

        Self {
            business: &brand.business_name,
            accent: &brand.accent_color,
            powered_by: &brand.powered_by,
            timestamp,
            name: &lead.name,
            phone: &lead.phone,
            email: &lead.email,
            service: &lead.service,
            tel,
            mailto: format!("mailto:{}", lead.email),
            page: lead.page.as_deref(),
            page_display: page_display.unwrap_or_default(),
            site: lead.site.as_deref(),
            company: lead.company.as_deref(),
            message_lines: lead
                .message
                .as_deref()
                .map(|m| m.split('\n').collect())
                .unwrap_or_default(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn brand() -> Brand {
        Brand {
            business_name: "Landeros Electrical".to_owned(),
            accent_color: "#3b82f6".to_owned(),
            from: "Landeros Electrical | New Lead <leads@quicklaunchweb.us>".to_owned(),
            powered_by: "QuickLaunchWeb".to_owned(),
        }
    }

    fn lead() -> LeadSubmission {
        LeadSubmission {
            name: "Dana Ruiz".to_owned(),
            phone: "(281) 555-0123".to_owned(),
            email: "dana@example.com".to_owned(),
            service: "Panel upgrade".to_owned(),
            ..LeadSubmission::default()
        }
    }

    #[test]
    fn timestamp_uses_zone_abbreviation() {
        let at = Utc.with_ymd_and_hms(2026, 10, 15, 20, 4, 0).unwrap();
        assert_eq!(
            format_timestamp(at, chrono_tz::America::Chicago),
            "Oct 15, 2026, 3:04 PM CDT"
        );
        let winter = Utc.with_ymd_and_hms(2026, 1, 5, 6, 30, 0).unwrap();
        assert_eq!(
            format_timestamp(winter, chrono_tz::America::Chicago),
            "Jan 05, 2026, 12:30 AM CST"
        );
    }

    #[test]
    fn subject_names_service_and_lead() {
        let n = compose(&lead(), &brand(), "now").unwrap();
        assert_eq!(n.subject, "⚡ New Lead ⚡ Panel upgrade | Dana Ruiz");
    }

    #[test]
    fn text_body_lists_present_fields_only() {
        let n = compose(&lead(), &brand(), "Oct 15, 2026, 3:04 PM CDT").unwrap();
        assert_eq!(
            n.text,
            "Timestamp: Oct 15, 2026, 3:04 PM CDT\n\
             Name: Dana Ruiz\n\
             Phone: (281) 555-0123\n\
             Email: dana@example.com\n\
             Service: Panel upgrade\n\
             Message:\n(none)"
        );
    }

    #[test]
    fn text_body_includes_optional_fields_in_order() {
        let mut lead = lead();
        lead.company = Some("Ruiz Farms".to_owned());
        lead.page = Some("https://landeros.example/ev".to_owned());
        lead.site = Some("https://landeros.example".to_owned());
        lead.message = Some("Two chargers\nplease".to_owned());
        let text = compose(&lead, &brand(), "t").unwrap().text;
        let company = text.find("Company:").unwrap();
        let service = text.find("Service:").unwrap();
        let page = text.find("Page:").unwrap();
        let site = text.find("Site:").unwrap();
        assert!(company < service && service < page && page < site);
        assert!(text.ends_with("Message:\nTwo chargers\nplease"));
    }

    #[test]
    fn html_escapes_user_text() {
        let mut lead = lead();
        lead.name = "<b>Dana</b>".to_owned();
        lead.message = Some("<script>alert(1)</script>\nbye".to_owned());
        lead.company = Some("A & B \"Co\"".to_owned());
        let html = compose(&lead, &brand(), "t").unwrap().html;
        assert!(!html.contains("<script>"));
        assert!(!html.contains("<b>Dana"));
        assert!(html.contains("&lt;script&gt;alert(1)"));
        assert!(html.contains("<br />bye"));
        assert!(html.contains("&lt;b&gt;Dana"));
        assert!(html.contains("A &amp; B"));
        assert!(!html.contains(r#""Co""#));
    }

    #[test]
    fn html_escapes_href_values() {
        let mut lead = lead();
        lead.page = Some(r#"https://x.example/"><script>"#.to_owned());
        let html = compose(&lead, &brand(), "t").unwrap().html;
        assert!(!html.contains(r#""><script>"#));
        assert!(!html.contains("<script>"));
        assert!(html.contains("&gt;&lt;script&gt;"));
    }

    #[test]
    fn html_links_normalized_phone_and_email() {
        let html = compose(&lead(), &brand(), "t").unwrap().html;
        assert!(html.contains(r#"href="tel:+12815550123""#));
        assert!(html.contains(r#"href="mailto:dana@example.com""#));
        assert!(html.contains("No message provided."));
    }

    #[test]
    fn html_falls_back_to_raw_phone_without_digits() {
        let mut lead = lead();
        lead.phone = "ask for Dana".to_owned();
        let html = compose(&lead, &brand(), "t").unwrap().html;
        assert!(html.contains(r#"href="tel:ask for Dana""#));
    }

    #[test]
    fn dev_pages_are_labelled() {
        assert!(is_dev_page("http://LOCALHOST:3000/"));
        assert!(is_dev_page("http://127.0.0.1:3000/"));
        assert!(is_dev_page("http://0.0.0.0/"));
        assert!(!is_dev_page("https://landeros.example/"));

        let mut lead = lead();
        lead.page = Some("http://localhost:3000/".to_owned());
        let n = compose(&lead, &brand(), "t").unwrap();
        assert!(n.text.contains("Page: http://localhost:3000/ (dev link)"));
        assert!(n.html.contains("(dev link)"));
    }

    #[test]
    fn brand_values_are_escaped() {
        let mut brand = brand();
        brand.business_name = "Fence <&> Weld".to_owned();
        let html = compose(&lead(), &brand, "t").unwrap().html;
        assert!(html.contains("Fence &lt;&amp;&gt; Weld"));
        assert!(html.contains("Powered by QuickLaunchWeb"));
    }

    #[test]
    fn into_email_sets_reply_to_and_bcc() {
        let bcc = vec!["audit@example.com".to_owned()];
        let email = compose(&lead(), &brand(), "t").unwrap().into_email(
            &brand(),
            "owner@example.com",
            &bcc,
            "dana@example.com",
        );
        assert_eq!(email.to, vec!["owner@example.com".to_owned()]);
        assert_eq!(email.bcc, bcc);
        assert_eq!(email.reply_to.as_deref(), Some("dana@example.com"));
        assert_eq!(email.from, brand().from);
    }
}
