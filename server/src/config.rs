//! Configuration management for the ArtistHub server.
//!
//! Loads configuration from environment variables with sensible defaults.

use serde::{Deserialize, Serialize};
use std::env;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// HTTP server configuration
    pub server: ServerConfig,
    /// `SQLite` database configuration
    pub database: DatabaseConfig,
    /// Google OAuth configuration
    pub google: GoogleConfig,
    /// SMTP delivery configuration; `None` falls back to console
    /// notifications
    pub smtp: Option<SmtpConfig>,
    /// Frontend base URL, without a trailing slash (dashboard redirects
    /// and chat links)
    pub frontend_url: String,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,
    /// Port to bind to
    pub port: u16,
}

/// `SQLite` database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Path to the database file (created if missing)
    pub path: String,
}

/// Google OAuth configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoogleConfig {
    /// OAuth 2.0 client ID from Google Cloud Console
    pub client_id: String,
    /// OAuth 2.0 client secret
    pub client_secret: String,
    /// Callback URL registered with Google
    pub redirect_uri: String,
}

/// SMTP delivery configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmtpConfig {
    /// SMTP server address
    pub server: String,
    /// SMTP server port
    pub port: u16,
    /// SMTP authentication username
    pub username: String,
    /// SMTP authentication password
    pub password: String,
    /// Sender email address
    pub from_email: String,
    /// Sender display name
    pub from_name: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Every variable has a development default; SMTP is considered
    /// configured only when both `SMTP_USERNAME` and `SMTP_PASSWORD` are
    /// set.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            server: ServerConfig {
                host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: env::var("PORT")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(8000),
            },
            database: DatabaseConfig {
                path: env::var("DATABASE_PATH").unwrap_or_else(|_| "artisthub.db".to_string()),
            },
            google: GoogleConfig {
                client_id: env::var("GOOGLE_CLIENT_ID").unwrap_or_default(),
                client_secret: env::var("GOOGLE_CLIENT_SECRET").unwrap_or_default(),
                redirect_uri: env::var("GOOGLE_REDIRECT_URI")
                    .unwrap_or_else(|_| "http://localhost:8000/auth/callback".to_string()),
            },
            smtp: smtp_from_env(),
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
        }
    }
}

/// Build the SMTP block when credentials are present.
fn smtp_from_env() -> Option<SmtpConfig> {
    let username = env::var("SMTP_USERNAME").ok()?;
    let password = env::var("SMTP_PASSWORD").ok()?;
    let from_email = env::var("SMTP_FROM_EMAIL").unwrap_or_else(|_| username.clone());

    Some(SmtpConfig {
        server: env::var("SMTP_SERVER").unwrap_or_else(|_| "smtp.gmail.com".to_string()),
        port: env::var("SMTP_PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(587),
        username,
        password,
        from_email,
        from_name: env::var("SMTP_FROM_NAME").unwrap_or_else(|_| "ArtistHub".to_string()),
    })
}

