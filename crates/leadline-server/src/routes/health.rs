//! Health check: `GET /health`

use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Build the `/health` router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/", get(health))
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub mail_configured: bool,
}

/// `GET /health`: Liveness plus whether leads can currently be delivered.
async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        mail_configured: state.mail_configured(),
    })
}
