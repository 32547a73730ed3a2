//! Database migration commands.
//!
//! Each server owns its migration directory; `migrate all` applies both
//! against their respective connection URLs (which may point at the same
//! database, the schemas don't overlap).

use super::CliError;

/// Run storefront database migrations.
///
/// # Errors
///
/// Returns `CliError` if the connection or a migration fails.
pub async fn storefront() -> Result<(), CliError> {
    let pool = super::connect("STOREFRONT_DATABASE_URL").await?;

    tracing::info!("Running storefront migrations");
    sqlx::migrate!("../storefront/migrations").run(&pool).await?;
    tracing::info!("Storefront migrations complete");

    Ok(())
}

/// Run admin database migrations.
///
/// # Errors
///
/// Returns `CliError` if the connection or a migration fails.
pub async fn admin() -> Result<(), CliError> {
    let pool = super::connect("ADMIN_DATABASE_URL").await?;

    tracing::info!("Running admin migrations");
    sqlx::migrate!("../admin/migrations").run(&pool).await?;
    tracing::info!("Admin migrations complete");

    Ok(())
}
