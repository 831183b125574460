//! Leadline HTTP server.
//!
//! Wires the core intake logic, the Resend mailer and the HTTP routes into an
//! Axum application. Serves the lead endpoint at `/api/lead` and a health
//! check at `/health`.

pub mod app;
pub mod config;
pub mod error;
pub mod resend;
pub mod routes;
pub mod state;
