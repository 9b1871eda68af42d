//! Authentication error types.

use thiserror::Error;

use autolot_core::FieldError;

use crate::db::RepositoryError;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Username or password missing from a registration.
    #[error("Missing arguments.")]
    MissingArguments,

    /// Username is too long or carries surrounding whitespace.
    #[error("{0}")]
    InvalidUsername(FieldError),

    /// User already exists.
    #[error("User already exists.")]
    UserAlreadyExists,

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),

    /// Password hashing error.
    #[error("password hashing error")]
    PasswordHash,
}
