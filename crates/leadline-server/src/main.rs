//! Leadline server entry point.
//!
//! Loads configuration, builds the mailer and shared state, then starts the
//! Axum HTTP server with graceful shutdown.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{info, warn};

use leadline_core::mailer::Mailer;
use leadline_server::app::build_router;
use leadline_server::config::ServerConfig;
use leadline_server::resend::ResendMailer;
use leadline_server::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration from environment.
    let config = ServerConfig::from_env();

    // Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level)),
        )
        .json()
        .init();

    info!(
        business = %config.brand.business_name,
        timezone = %config.timezone,
        "Leadline starting"
    );

    let state = Arc::new(build_app_state(&config)?);
    let app = build_router(state);

    // Bind and serve.
    let listener = TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind to {}", config.bind_addr))?;

    info!(addr = %config.bind_addr, "Leadline server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Leadline server stopped");
    Ok(())
}

/// Build the shared application state, constructing the Resend mailer when a
/// key is configured.
fn build_app_state(config: &ServerConfig) -> anyhow::Result<AppState> {
    let mailer: Option<Arc<dyn Mailer>> = match &config.mail.resend_api_key {
        Some(key) => {
            let mailer = ResendMailer::new(
                key.clone(),
                &config.mail.api_url,
                Duration::from_secs(config.mail.timeout_secs),
            )
            .context("failed to build Resend client")?;
            info!(url = %config.mail.api_url, "using Resend mail delivery");
            Some(Arc::new(mailer) as Arc<dyn Mailer>)
        }
        None => None,
    };

    let missing = config.mail.missing();
    if missing.is_empty() {
        info!(bcc = config.mail.bcc.len(), "lead delivery configured");
    } else {
        warn!(
            missing = ?missing,
            "lead delivery not configured; submissions will be rejected with 500"
        );
    }

    Ok(AppState::new(config, mailer))
}

/// Wait for SIGINT or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for ctrl-c");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("received ctrl-c, shutting down"),
        () = terminate => info!("received SIGTERM, shutting down"),
    }
}
