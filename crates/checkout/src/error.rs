//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures unexpected errors to
//! Sentry before responding to the client. All route handlers return
//! `Result<T, AppError>`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::services::ValidationError;
use crate::store::RepositoryError;

/// Application-level error type for the checkout service.
#[derive(Debug, Error)]
pub enum AppError {
    /// Checkout submission failed validation; blocks order processing.
    #[error("Validation failed")]
    Validation(Vec<ValidationError>),

    /// Missing or invalid nonce on the final-cost endpoint.
    #[error("Security check failed")]
    InvalidNonce,

    /// Order lookup failed.
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture unexpected errors to Sentry
        if matches!(self, Self::Internal(_)) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        match self {
            Self::Validation(errors) => {
                let messages: Vec<String> =
                    errors.iter().map(ToString::to_string).collect();
                (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    Json(json!({ "errors": messages })),
                )
                    .into_response()
            }
            Self::InvalidNonce => (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": "Security check failed." })),
            )
                .into_response(),
            Self::Repository(RepositoryError::NotFound(_)) => (
                StatusCode::NOT_FOUND,
                Json(json!({ "error": "Order not found." })),
            )
                .into_response(),
            // Don't expose internal error details to clients
            Self::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Internal server error" })),
            )
                .into_response(),
        }
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
