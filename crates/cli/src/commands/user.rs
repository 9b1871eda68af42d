//! API user management commands.
//!
//! Goes through the same credential store as `POST /api/users`, so the
//! validation and hashing rules are identical.

use thiserror::Error;

use autolot_api::services::{AuthError, AuthService};

/// Errors that can occur during user operations.
#[derive(Debug, Error)]
pub enum UserError {
    /// Required environment variable is missing.
    #[error("Missing environment variable: AUTOLOT_DATABASE_URL (or DATABASE_URL)")]
    MissingEnvVar,

    /// Database connection error.
    #[error("Database connection error: {0}")]
    Database(#[from] sqlx::Error),

    /// Registration rejected.
    #[error(transparent)]
    Auth(#[from] AuthError),
}

/// Create a new API user.
///
/// # Returns
///
/// The ID of the created user.
///
/// # Errors
///
/// Returns `UserError::Auth` for empty fields, an over-long username, or a
/// username that is already taken.
pub async fn create(username: &str, password: &str) -> Result<i32, UserError> {
    let database_url = super::database_url().ok_or(UserError::MissingEnvVar)?;
    let pool = super::connect(&database_url).await?;

    tracing::info!("Creating user: {}", username);
    let user = AuthService::new(&pool).register(username, password).await?;

    tracing::info!(
        "User created successfully! ID: {}, Username: {}",
        user.id,
        user.username
    );
    Ok(user.id.as_i32())
}
