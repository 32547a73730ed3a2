//! Admin account creation.

use argon2::{
    Argon2,
    password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
};
use sqlx::types::Json;

use tamarind_core::{AdminPermissions, AdminRole, Email};

use super::CliError;

/// Minimum password length, matching the servers.
const MIN_PASSWORD_LENGTH: usize = 8;

/// Fields for a new admin account.
pub struct CreateAccount<'c> {
    pub email: &'c str,
    pub name: &'c str,
    /// Defaults to the email's local part.
    pub username: Option<&'c str>,
    pub password: &'c str,
    pub role: AdminRole,
}

/// Create an admin account with the role's standard permission grant.
///
/// # Errors
///
/// Returns `CliError` for invalid input, a taken email or username, or a
/// database failure.
pub async fn create_account(account: CreateAccount<'_>) -> Result<(), CliError> {
    let email = Email::parse(account.email)
        .map_err(|e| CliError::Invalid(format!("invalid email: {e}")))?;

    if account.password.len() < MIN_PASSWORD_LENGTH {
        return Err(CliError::Invalid(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }

    let username = account
        .username
        .map_or_else(|| local_part(email.as_str()), str::to_owned);

    let salt = SaltString::generate(&mut OsRng);
    let password_hash = Argon2::default()
        .hash_password(account.password.as_bytes(), &salt)
        .map_err(|e| CliError::PasswordHash(e.to_string()))?
        .to_string();

    let permissions = AdminPermissions::for_role(account.role);

    let pool = super::connect("ADMIN_DATABASE_URL").await?;

    let result = sqlx::query(
        "INSERT INTO admin.admin_users (username, email, name, password_hash, role, permissions)
         VALUES ($1, $2, $3, $4, $5, $6)",
    )
    .bind(&username)
    .bind(&email)
    .bind(account.name)
    .bind(&password_hash)
    .bind(account.role)
    .bind(Json(permissions))
    .execute(&pool)
    .await;

    match result {
        Ok(_) => {
            tracing::info!(%email, %username, role = %account.role, "admin account created");
            Ok(())
        }
        Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => Err(
            CliError::Invalid("an admin with this email or username already exists".to_owned()),
        ),
        Err(e) => Err(e.into()),
    }
}

/// The part of an email before the `@`.
fn local_part(email: &str) -> String {
    email.split('@').next().unwrap_or(email).to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_part() {
        assert_eq!(local_part("ops@example.com"), "ops");
    }
}
