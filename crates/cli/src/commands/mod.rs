//! CLI subcommand implementations.

use secrecy::SecretString;
use sqlx::PgPool;
use thiserror::Error;

pub mod admin;
pub mod migrate;
pub mod seed;

/// Errors from CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    #[error("Invalid argument: {0}")]
    InvalidArgument(&'static str),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Password hashing error: {0}")]
    PasswordHash(String),

    #[error("{0}")]
    Invalid(String),
}

/// Connect using `primary_key`, falling back to `DATABASE_URL`.
pub(crate) async fn connect(primary_key: &'static str) -> Result<PgPool, CliError> {
    dotenvy::dotenv().ok();

    let url = database_url(primary_key)?;

    use secrecy::ExposeSecret;
    let pool = PgPool::connect(url.expose_secret()).await?;
    Ok(pool)
}

fn database_url(primary_key: &'static str) -> Result<SecretString, CliError> {
    if let Ok(value) = std::env::var(primary_key) {
        return Ok(SecretString::from(value));
    }
    if let Ok(value) = std::env::var("DATABASE_URL") {
        return Ok(SecretString::from(value));
    }
    Err(CliError::MissingEnvVar(primary_key))
}
