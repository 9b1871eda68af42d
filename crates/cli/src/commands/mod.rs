//! CLI subcommands.

pub mod migrate;
pub mod user;

use secrecy::SecretString;
use sqlx::PgPool;

/// Read the database URL from `AUTOLOT_DATABASE_URL`, then `DATABASE_URL`.
fn database_url() -> Option<SecretString> {
    dotenvy::dotenv().ok();

    std::env::var("AUTOLOT_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .ok()
        .map(SecretString::from)
}

/// Connect a single-purpose pool for a CLI command.
async fn connect(database_url: &SecretString) -> Result<PgPool, sqlx::Error> {
    use secrecy::ExposeSecret;

    tracing::info!("Connecting to database...");
    PgPool::connect(database_url.expose_secret()).await
}
