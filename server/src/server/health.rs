//! Health check endpoints for the ArtistHub server.
//!
//! Provides endpoints for monitoring service health and readiness.

use super::state::AppState;
use artisthub_auth::OAuth2Provider;
use artisthub_notify::BookingNotifier;
use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service version
    pub version: String,
}

/// Health check endpoint.
///
/// Returns 200 OK if the service is running.
/// This is a simple liveness check - it doesn't verify dependencies.
///
/// # Example
///
/// ```bash
/// curl http://localhost:8000/health
/// # {"status":"ok","version":"0.1.0"}
/// ```
pub async fn health_check() -> (StatusCode, Json<HealthResponse>) {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }),
    )
}

/// Readiness check response.
#[derive(Serialize)]
pub struct ReadinessResponse {
    /// Overall readiness status
    pub ready: bool,
    /// Database connectivity
    pub database: bool,
}

/// Readiness check endpoint.
///
/// Returns 200 OK when the database answers a ping, 503 otherwise.
///
/// # Example
///
/// ```bash
/// curl http://localhost:8000/health/ready
/// # {"ready":true,"database":true}
/// ```
pub async fn readiness_check<P, N>(
    State(state): State<AppState<P, N>>,
) -> (StatusCode, Json<ReadinessResponse>)
where
    P: OAuth2Provider + Clone + 'static,
    N: BookingNotifier + Clone + 'static,
{
    match state.db.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(ReadinessResponse {
                ready: true,
                database: true,
            }),
        ),
        Err(error) => {
            tracing::warn!(error = %error, "Readiness check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ReadinessResponse {
                    ready: false,
                    database: false,
                }),
            )
        }
    }
}
