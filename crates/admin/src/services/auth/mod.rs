//! Admin authentication service.
//!
//! Login, account creation, and password change for panel accounts.
//! Passwords are hashed with Argon2id; sessions are stateless JWTs signed
//! in `tamarind_core::token` with the role and permission grants embedded.

mod error;

pub use error::AdminAuthError;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use sqlx::PgPool;

use tamarind_core::{AdminClaims, AdminId, AdminPermissions, AdminRole, Email, token};

use crate::db::RepositoryError;
use crate::db::admin_users::{AdminUserRepository, NewAdmin};
use crate::models::AdminUser;

/// Minimum password length.
const MIN_PASSWORD_LENGTH: usize = 8;

/// Fields accepted when creating an admin account.
pub struct CreateAdminRequest<'r> {
    pub username: &'r str,
    pub email: &'r str,
    pub name: &'r str,
    pub password: &'r str,
    pub role: AdminRole,
    /// Explicit grant; defaults to the role's standard grant when `None`.
    pub permissions: Option<AdminPermissions>,
}

/// Admin authentication service.
pub struct AdminAuthService<'a> {
    admins: AdminUserRepository<'a>,
    jwt_secret: &'a [u8],
}

impl<'a> AdminAuthService<'a> {
    /// Create a new admin authentication service.
    #[must_use]
    pub const fn new(pool: &'a PgPool, jwt_secret: &'a [u8]) -> Self {
        Self {
            admins: AdminUserRepository::new(pool),
            jwt_secret,
        }
    }

    /// Login with email and password, issuing a fresh session token.
    ///
    /// Records the login timestamp on success.
    ///
    /// # Errors
    ///
    /// Returns `AdminAuthError::AccountDisabled` for deactivated accounts.
    /// Returns `AdminAuthError::InvalidCredentials` if the email/password
    /// is wrong.
    pub async fn login(
        &self,
        email: &str,
        password: &str,
    ) -> Result<(AdminUser, String), AdminAuthError> {
        let email = Email::parse(email)?;

        let Some((admin, password_hash)) = self.admins.get_password_hash(&email).await? else {
            if self.admins.is_disabled(&email).await? {
                return Err(AdminAuthError::AccountDisabled);
            }
            return Err(AdminAuthError::InvalidCredentials);
        };

        verify_password(password, &password_hash)?;

        self.admins.touch_last_login(admin.id).await?;
        let token = self.issue_token(&admin)?;

        Ok((admin, token))
    }

    /// Get an admin by ID.
    ///
    /// # Errors
    ///
    /// Returns `AdminAuthError::AdminNotFound` if the admin doesn't exist.
    pub async fn get_admin(&self, admin_id: AdminId) -> Result<AdminUser, AdminAuthError> {
        self.admins
            .get_by_id(admin_id)
            .await?
            .ok_or(AdminAuthError::AdminNotFound)
    }

    /// All admin accounts.
    ///
    /// # Errors
    ///
    /// Returns `AdminAuthError::Database` if the query fails.
    pub async fn list_admins(&self) -> Result<Vec<AdminUser>, AdminAuthError> {
        Ok(self.admins.list_all().await?)
    }

    /// Create a new admin account.
    ///
    /// # Errors
    ///
    /// Returns `AdminAuthError::MissingField` if username or name is blank.
    /// Returns `AdminAuthError::WeakPassword` if the password doesn't meet
    /// requirements. Returns `AdminAuthError::AdminAlreadyExists` if the
    /// email or username is taken.
    pub async fn create_admin(
        &self,
        request: CreateAdminRequest<'_>,
    ) -> Result<AdminUser, AdminAuthError> {
        let username = require_field(request.username, "Username is required")?;
        let name = require_field(request.name, "Name is required")?;
        let email = Email::parse(request.email)?;
        validate_password(request.password)?;

        let password_hash = hash_password(request.password)?;
        let permissions = request
            .permissions
            .unwrap_or_else(|| AdminPermissions::for_role(request.role));

        let admin = self
            .admins
            .create(NewAdmin {
                username,
                email: &email,
                name,
                password_hash: &password_hash,
                role: request.role,
                permissions,
            })
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => AdminAuthError::AdminAlreadyExists,
                other => AdminAuthError::Database(other),
            })?;

        Ok(admin)
    }

    /// Change a password after re-verifying the current one.
    ///
    /// # Errors
    ///
    /// Returns `AdminAuthError::InvalidCredentials` if the current password
    /// is wrong. Returns `AdminAuthError::WeakPassword` if the new password
    /// doesn't meet requirements.
    pub async fn change_password(
        &self,
        admin_id: AdminId,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), AdminAuthError> {
        let current_hash = self
            .admins
            .get_password_hash_by_id(admin_id)
            .await
            .map_err(|e| match e {
                RepositoryError::NotFound => AdminAuthError::AdminNotFound,
                other => AdminAuthError::Database(other),
            })?;

        verify_password(current_password, &current_hash)?;
        validate_password(new_password)?;

        let new_hash = hash_password(new_password)?;
        self.admins.set_password_hash(admin_id, &new_hash).await?;

        Ok(())
    }

    fn issue_token(&self, admin: &AdminUser) -> Result<String, AdminAuthError> {
        let claims = AdminClaims {
            sub: admin.id,
            email: admin.email.clone(),
            role: admin.role,
            permissions: admin.permissions,
        };
        Ok(token::sign_admin(claims, self.jwt_secret)?)
    }
}

/// Reject blank required fields.
fn require_field<'f>(value: &'f str, message: &str) -> Result<&'f str, AdminAuthError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AdminAuthError::MissingField(message.to_owned()));
    }
    Ok(trimmed)
}

/// Validate password meets requirements.
fn validate_password(password: &str) -> Result<(), AdminAuthError> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(AdminAuthError::WeakPassword(format!(
            "Password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }

    Ok(())
}

/// Hash a password using Argon2id.
fn hash_password(password: &str) -> Result<String, AdminAuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AdminAuthError::PasswordHash(e.to_string()))
}

/// Verify a password against a hash.
fn verify_password(password: &str, hash: &str) -> Result<(), AdminAuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AdminAuthError::InvalidCredentials)?;
    let argon2 = Argon2::default();

    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AdminAuthError::InvalidCredentials)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_password_length_rule() {
        assert!(validate_password("short").is_err());
        assert!(validate_password("exactly8").is_ok());
    }

    #[test]
    fn test_hash_and_verify_roundtrip() {
        let hash = hash_password("correct horse battery").unwrap();
        assert!(verify_password("correct horse battery", &hash).is_ok());
        assert!(matches!(
            verify_password("wrong password!", &hash),
            Err(AdminAuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_require_field_trims() {
        assert_eq!(require_field("  ops  ", "Username is required").unwrap(), "ops");
        assert!(matches!(
            require_field("", "Username is required"),
            Err(AdminAuthError::MissingField(msg)) if msg == "Username is required"
        ));
    }
}
