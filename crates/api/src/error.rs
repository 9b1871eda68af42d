//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures server errors to Sentry
//! before responding to the client. All route handlers return
//! `Result<T, AppError>`; every error body is `{"message": "..."}`.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::services::{AuthError, RegistryError};

/// Message returned for every unclassified failure.
pub const INTERNAL_ERROR_MESSAGE: &str = "An unhandled exception occurred.";

/// Application-level error type for the API.
#[derive(Debug, Error)]
pub enum AppError {
    /// Customer or vehicle registry operation failed.
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// Authentication operation failed.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Request body missing, malformed, or lacking a required field.
    #[error("{0}")]
    MissingArgument(String),
}

/// Message returned when the request body cannot be used.
pub const MISSING_ARGUMENTS_MESSAGE: &str = "Missing arguments.";

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(rejection = %rejection.body_text(), "Unusable request body");
        Self::MissingArgument(MISSING_ARGUMENTS_MESSAGE.to_string())
    }
}

/// Client-facing failure categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    MissingArgument,
    LimitExceeded,
    InvalidValue,
    DuplicateKey,
    NotFound,
    Internal,
}

impl ErrorKind {
    /// HTTP status for this category.
    #[must_use]
    pub const fn status(self) -> StatusCode {
        match self {
            Self::MissingArgument
            | Self::LimitExceeded
            | Self::InvalidValue
            | Self::DuplicateKey => StatusCode::FORBIDDEN,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl AppError {
    /// Classify this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Registry(err) => match err {
                RegistryError::CustomerNotFound(_) | RegistryError::CarNotFound { .. } => {
                    ErrorKind::NotFound
                }
                RegistryError::DuplicateDoc(_) => ErrorKind::DuplicateKey,
                RegistryError::CarLimitReached { .. } => ErrorKind::LimitExceeded,
                RegistryError::InvalidCarSpec(_) | RegistryError::InvalidField(_) => {
                    ErrorKind::InvalidValue
                }
                RegistryError::MissingField(_) => ErrorKind::MissingArgument,
                RegistryError::Repository(_) => ErrorKind::Internal,
            },
            Self::Auth(err) => match err {
                AuthError::MissingArguments => ErrorKind::MissingArgument,
                AuthError::InvalidUsername(_) => ErrorKind::InvalidValue,
                AuthError::UserAlreadyExists => ErrorKind::DuplicateKey,
                AuthError::Repository(_) | AuthError::PasswordHash => ErrorKind::Internal,
            },
            Self::MissingArgument(_) => ErrorKind::MissingArgument,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let kind = self.kind();

        // Capture server errors to Sentry
        if kind == ErrorKind::Internal {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        } else {
            tracing::debug!(error = %self, kind = ?kind, "Request rejected");
        }

        // Don't expose internal error details to clients
        let message = if kind == ErrorKind::Internal {
            INTERNAL_ERROR_MESSAGE.to_string()
        } else {
            self.to_string()
        };

        (kind.status(), Json(json!({ "message": message }))).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Set the Sentry user context for an authenticated request.
pub fn set_sentry_user(user_id: &impl ToString, username: &str) {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            id: Some(user_id.to_string()),
            username: Some(username.to_string()),
            ..Default::default()
        }));
    });
}
