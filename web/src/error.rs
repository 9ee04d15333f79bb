//! Error types for web handlers.
//!
//! This module defines [`AppError`], the bridge between service-layer
//! errors and HTTP responses. Handlers return `Result<_, AppError>` and
//! use `?` on booking, auth and store calls; the `From` impls below pick
//! the status code and the `IntoResponse` impl renders the JSON body.

use artisthub_auth::AuthError;
use artisthub_booking::BookingError;
use artisthub_store::StoreError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::fmt;

/// Application error type for web handlers.
///
/// Wraps service errors and renders them as HTTP responses via Axum's
/// `IntoResponse`. Client-visible message texts come from the service
/// layer verbatim; only the `source` chain stays server-side.
///
/// # Examples
///
/// ```ignore
/// async fn handler(caller: SessionUser) -> Result<Json<Data>, AppError> {
///     let booking = state.bookings.get(id, &caller.0).await?;
///     Ok(Json(booking.into()))
/// }
/// ```
#[derive(Debug)]
pub struct AppError {
    /// HTTP status code
    status: StatusCode,
    /// Error message (user-facing)
    message: String,
    /// Error code (for client error handling)
    code: String,
    /// Internal error (for logging, not exposed to client)
    source: Option<anyhow::Error>,
}

impl AppError {
    /// Create a new application error.
    #[must_use]
    pub const fn new(status: StatusCode, message: String, code: String) -> Self {
        Self {
            status,
            message,
            code,
            source: None,
        }
    }

    /// Create a new error with a source error.
    #[must_use]
    pub fn with_source(mut self, source: anyhow::Error) -> Self {
        self.source = Some(source);
        self
    }

    /// Create a 400 Bad Request error.
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            message.into(),
            "BAD_REQUEST".to_string(),
        )
    }

    /// Create a 401 Unauthorized error.
    #[must_use]
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::UNAUTHORIZED,
            message.into(),
            "UNAUTHORIZED".to_string(),
        )
    }

    /// Create a 403 Forbidden error.
    #[must_use]
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::FORBIDDEN,
            message.into(),
            "FORBIDDEN".to_string(),
        )
    }

    /// Create a 404 Not Found error.
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::NOT_FOUND,
            message.into(),
            "NOT_FOUND".to_string(),
        )
    }

    /// Create a 409 Conflict error.
    #[must_use]
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::CONFLICT,
            message.into(),
            "CONFLICT".to_string(),
        )
    }

    /// Create a 500 Internal Server Error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            message.into(),
            "INTERNAL_SERVER_ERROR".to_string(),
        )
    }

    /// Create a 503 Service Unavailable error.
    #[must_use]
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::SERVICE_UNAVAILABLE,
            message.into(),
            "SERVICE_UNAVAILABLE".to_string(),
        )
    }

    /// The HTTP status this error renders with.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Error response body (JSON).
///
/// Wire shape: `{"error": {"code": "...", "message": "..."}}`.
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Debug, Serialize)]
struct ErrorDetail {
    /// Error code (for client error handling).
    code: String,
    /// Human-readable error message.
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log internal errors
        if self.status.is_server_error() {
            if let Some(source) = &self.source {
                tracing::error!(
                    status = %self.status,
                    code = %self.code,
                    message = %self.message,
                    error = %source,
                    "Internal server error"
                );
            } else {
                tracing::error!(
                    status = %self.status,
                    code = %self.code,
                    message = %self.message,
                    "Internal server error"
                );
            }
        }

        let body = ErrorBody {
            error: ErrorDetail {
                code: self.code,
                message: self.message,
            },
        };

        (self.status, Json(body)).into_response()
    }
}

/// Convert `anyhow::Error` to `AppError`.
impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        Self::internal("An internal error occurred").with_source(err)
    }
}

/// Convert database errors to `AppError`.
///
/// Store failures are never the caller's fault; the detail goes to the
/// log, the client sees a generic 500.
impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        Self::internal("An internal error occurred").with_source(err.into())
    }
}

/// Convert booking and chat service errors to `AppError`.
///
/// Clients match on the message texts, so this mapping only chooses the
/// status code and passes the service message through untouched.
impl From<BookingError> for AppError {
    fn from(err: BookingError) -> Self {
        match err {
            BookingError::Domain(_) | BookingError::BudgetTooLow { .. } => {
                Self::bad_request(err.to_string())
            }
            BookingError::ArtistUnavailable | BookingError::DuplicateBooking => {
                Self::conflict(err.to_string())
            }
            BookingError::ArtistNotFound
            | BookingError::BookingNotFound
            | BookingError::InvalidChatToken => Self::not_found(err.to_string()),
            BookingError::Forbidden | BookingError::OwnBookingsOnly => {
                Self::forbidden(err.to_string())
            }
            BookingError::Store(_) => {
                Self::internal("An internal error occurred").with_source(err.into())
            }
        }
    }
}

/// Convert authentication errors to `AppError`.
///
/// Everything the caller can fix (or retry through the login flow) is a
/// 401, including upstream OAuth failures during the callback. Only
/// server-side faults become 500s.
impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Unauthenticated
            | AuthError::EmailNotVerified
            | AuthError::StateMismatch
            | AuthError::TokenExchange(_)
            | AuthError::UserInfo(_) => Self::unauthorized(err.to_string()),
            AuthError::AuthorizationUrl(_) | AuthError::Store(_) => {
                Self::internal("An internal error occurred").with_source(err.into())
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic, clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AppError::bad_request("Invalid input");
        assert_eq!(err.to_string(), "[BAD_REQUEST] Invalid input");
    }

    #[test]
    fn test_not_found() {
        let err = AppError::not_found("Booking not found");
        assert_eq!(err.to_string(), "[NOT_FOUND] Booking not found");
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_body_nests_under_error_key() {
        let response = AppError::conflict("A booking already exists").into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"]["code"], "CONFLICT");
        assert_eq!(body["error"]["message"], "A booking already exists");
    }

    #[test]
    fn test_booking_error_statuses() {
        let cases = [
            (BookingError::ArtistUnavailable, StatusCode::CONFLICT),
            (BookingError::DuplicateBooking, StatusCode::CONFLICT),
            (BookingError::ArtistNotFound, StatusCode::NOT_FOUND),
            (BookingError::BookingNotFound, StatusCode::NOT_FOUND),
            (BookingError::InvalidChatToken, StatusCode::NOT_FOUND),
            (BookingError::Forbidden, StatusCode::FORBIDDEN),
            (BookingError::OwnBookingsOnly, StatusCode::FORBIDDEN),
        ];
        for (err, status) in cases {
            let expected_message = err.to_string();
            let app_err = AppError::from(err);
            assert_eq!(app_err.status(), status);
            assert_eq!(app_err.message, expected_message);
        }
    }

    #[test]
    fn test_budget_too_low_is_bad_request() {
        let err = AppError::from(BookingError::BudgetTooLow {
            min_price: 500.0,
            currency: "USD".to_string(),
        });
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.message, "Budget must be at least 500 USD");
    }

    #[test]
    fn test_store_error_hides_detail() {
        let err = AppError::from(BookingError::Store(StoreError::Query(
            "database is locked".to_string(),
        )));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message, "An internal error occurred");
        assert!(err.source.is_some());
    }

    #[test]
    fn test_auth_error_statuses() {
        assert_eq!(
            AppError::from(AuthError::Unauthenticated).status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::from(AuthError::StateMismatch).status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::from(AuthError::TokenExchange("502 from Google".to_string())).status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::from(AuthError::AuthorizationUrl("bad redirect".to_string())).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
