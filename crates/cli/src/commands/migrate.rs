//! Database migration command.
//!
//! Applies every pending migration under `crates/api/migrations/`. The files
//! are embedded at compile time, so the binary works from any directory.

use thiserror::Error;

use autolot_api::db::MIGRATOR;

/// Errors that can occur while migrating.
#[derive(Debug, Error)]
pub enum MigrationError {
    #[error("Missing environment variable: AUTOLOT_DATABASE_URL (or DATABASE_URL)")]
    MissingEnvVar,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Run database migrations.
///
/// # Errors
///
/// Returns `MigrationError` if the URL is missing, the database is
/// unreachable, or a migration fails.
pub async fn run() -> Result<(), MigrationError> {
    let database_url = super::database_url().ok_or(MigrationError::MissingEnvVar)?;
    let pool = super::connect(&database_url).await?;

    tracing::info!(available = MIGRATOR.iter().count(), "Running migrations...");
    MIGRATOR.run(&pool).await?;

    tracing::info!("Migrations complete!");
    Ok(())
}
