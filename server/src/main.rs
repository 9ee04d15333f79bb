//! ArtistHub HTTP server.
//!
//! Booking marketplace backend: Google OAuth login, artist profiles,
//! booking lifecycle, and per-booking chat.

use artisthub_auth::{AuthConfig, GoogleOAuthProvider};
use artisthub_server::{build_router, AppNotifier, AppState, Config};
use artisthub_store::Database;
use std::path::Path;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file (if present)
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "artisthub=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting ArtistHub HTTP server");

    // Load configuration
    let config = Config::from_env();
    info!(
        database_path = %config.database.path,
        frontend_url = %config.frontend_url,
        smtp_configured = config.smtp.is_some(),
        "Configuration loaded"
    );
    if config.google.client_id.is_empty() {
        warn!("GOOGLE_CLIENT_ID is not set; OAuth login will fail until configured");
    }

    // Open database (creates the file and schema on first run)
    info!("Opening database...");
    let db = Database::open(Path::new(&config.database.path)).await?;
    info!("Database ready");

    // Wire up services
    let oauth = GoogleOAuthProvider::new(
        config.google.client_id.clone(),
        config.google.client_secret.clone(),
    );
    let auth_config = AuthConfig::new(config.google.redirect_uri.clone());
    let notifier = AppNotifier::from_config(&config);
    let state = AppState::new(db, auth_config, oauth, notifier, config.frontend_url.clone());

    // Build router
    let app = build_router(state);

    // Create server address
    let addr = format!("{}:{}", config.server.host, config.server.port);
    info!(address = %addr, "Starting HTTP server");

    // Create TCP listener
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    // Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

/// Graceful shutdown signal handler.
///
/// Waits for:
/// - Ctrl+C (SIGINT)
/// - SIGTERM (in production environments)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            error!(error = %err, "Failed to install Ctrl+C handler");
            // Without a handler this branch can never fire; park it.
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                error!(error = %err, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C signal, shutting down gracefully...");
        },
        () = terminate => {
            info!("Received SIGTERM signal, shutting down gracefully...");
        },
    }
}
