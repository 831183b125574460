//! Lead intake route: `POST /api/lead`
//!
//! Accepts JSON, URL-encoded or multipart submissions from the landing-page
//! form, validates them and forwards one notification email. A filled-in
//! honeypot gets the same success answer as a delivered lead so automated
//! senders cannot tell the two apart.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{FromRequest, Multipart, Request, State};
use axum::http::header::CONTENT_TYPE;
use axum::routing::post;
use axum::{Form, Json, Router};
use chrono::Utc;
use tracing::info;

use leadline_core::fields::{self, RawFields};
use leadline_core::notify;
use leadline_core::submission::LeadSubmission;

use crate::error::{AppError, LeadResponse};
use crate::state::AppState;

/// Build the `/api/lead` router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/", post(submit_lead))
}

/// `POST /api/lead`: Validate a submission and send the notification.
async fn submit_lead(
    State(state): State<Arc<AppState>>,
    req: Request,
) -> Result<Json<LeadResponse>, AppError> {
    let raw = parse_body(req).await?;
    let lead = LeadSubmission::from_fields(&raw);

    if lead.is_spam() {
        info!("discarded honeypot submission");
        return Ok(Json(LeadResponse::ok()));
    }

    lead.validate()?;

    let (Some(mailer), Some(to)) = (state.mailer.as_ref(), state.mail.to_email.as_deref()) else {
        let mut missing = state.mail.missing();
        if state.mailer.is_none() && !missing.contains(&"RESEND_API_KEY") {
            missing.insert(0, "RESEND_API_KEY");
        }
        return Err(AppError::Misconfigured { missing });
    };

    let timestamp = notify::format_timestamp(Utc::now(), state.timezone);
    let email = notify::compose(&lead, &state.brand, &timestamp)?.into_email(
        &state.brand,
        to,
        &state.mail.bcc,
        &lead.email,
    );

    mailer.send(&email).await?;

    info!(
        service = %lead.service,
        has_message = lead.message.is_some(),
        bcc = state.mail.bcc.len(),
        "lead notification sent"
    );
    Ok(Json(LeadResponse::ok()))
}

/// Decode the request body into raw string fields.
///
/// A content type containing `application/json` is decoded as JSON;
/// `multipart/form-data` keeps only text parts; anything else is treated as a
/// URL-encoded form.
async fn parse_body(req: Request) -> Result<RawFields, AppError> {
    let content_type = req
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_ascii_lowercase();

    if content_type.contains("application/json") {
        let body = Bytes::from_request(req, &())
            .await
            .map_err(|e| AppError::MalformedBody(e.body_text()))?;
        let value: serde_json::Value = serde_json::from_slice(&body)
            .map_err(|e| AppError::MalformedBody(e.to_string()))?;
        return Ok(fields::from_json(value));
    }

    if content_type.contains("multipart/form-data") {
        let mut multipart = Multipart::from_request(req, &())
            .await
            .map_err(|e| AppError::MalformedBody(e.body_text()))?;
        let mut raw = RawFields::new();
        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::MalformedBody(e.body_text()))?
        {
            // File parts are never lead fields.
            if field.file_name().is_some() {
                continue;
            }
            let Some(name) = field.name().map(str::to_owned) else {
                continue;
            };
            let value = field
                .text()
                .await
                .map_err(|e| AppError::MalformedBody(e.body_text()))?;
            raw.insert(name, value);
        }
        return Ok(raw);
    }

    let Form(pairs) = Form::<Vec<(String, String)>>::from_request(req, &())
        .await
        .map_err(|e| AppError::MalformedBody(e.body_text()))?;
    Ok(pairs.into_iter().collect())
}
