//! Authentication service.
//!
//! Password registration, login, password change, and the password reset
//! flow. Passwords are hashed with Argon2id; sessions are stateless JWTs
//! signed in `tamarind_core::token`.

mod error;

pub use error::AuthError;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use chrono::{TimeDelta, Utc};
use rand::RngCore;
use sqlx::PgPool;

use tamarind_core::{Email, UserClaims, UserId, token};

use crate::db::RepositoryError;
use crate::db::users::UserRepository;
use crate::models::User;

/// Minimum password length.
const MIN_PASSWORD_LENGTH: usize = 8;

/// How long a password reset token stays valid.
fn reset_token_ttl() -> TimeDelta {
    TimeDelta::hours(1)
}

/// Authentication service.
pub struct AuthService<'a> {
    users: UserRepository<'a>,
    jwt_secret: &'a [u8],
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(pool: &'a PgPool, jwt_secret: &'a [u8]) -> Self {
        Self {
            users: UserRepository::new(pool),
            jwt_secret,
        }
    }

    /// Register a new account and issue its session token.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::MissingField` if name or username is blank.
    /// Returns `AuthError::InvalidEmail` if the email format is invalid.
    /// Returns `AuthError::WeakPassword` if the password doesn't meet requirements.
    /// Returns `AuthError::UserAlreadyExists` if the email is already registered.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        name: &str,
        username: &str,
    ) -> Result<(User, String), AuthError> {
        let name = require_field(name, "Name is required")?;
        let username = require_field(username, "Username is required")?;
        let email = Email::parse(email)?;
        validate_password(password)?;

        let password_hash = hash_password(password)?;

        let user = self
            .users
            .create(&email, &password_hash, name, username)
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => AuthError::UserAlreadyExists,
                other => AuthError::Database(other),
            })?;

        let token = self.issue_token(&user)?;
        Ok((user, token))
    }

    /// Login with email and password, issuing a fresh session token.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if the email/password is wrong.
    pub async fn login(&self, email: &str, password: &str) -> Result<(User, String), AuthError> {
        let email = Email::parse(email)?;

        let (user, password_hash) = self
            .users
            .get_password_hash(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        verify_password(password, &password_hash)?;

        let token = self.issue_token(&user)?;
        Ok((user, token))
    }

    /// Get a user by ID.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::UserNotFound` if the user doesn't exist.
    pub async fn get_user(&self, user_id: UserId) -> Result<User, AuthError> {
        self.users
            .get_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)
    }

    /// Update the caller's profile fields.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::MissingField` if name or username is blank.
    /// Returns `AuthError::UserNotFound` if the user doesn't exist.
    pub async fn update_profile(
        &self,
        user_id: UserId,
        name: &str,
        username: &str,
    ) -> Result<User, AuthError> {
        let name = require_field(name, "Name is required")?;
        let username = require_field(username, "Username is required")?;

        self.users
            .update_profile(user_id, name, username)
            .await
            .map_err(|e| match e {
                RepositoryError::NotFound => AuthError::UserNotFound,
                other => AuthError::Database(other),
            })
    }

    /// Change a password after re-verifying the current one.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if the current password is wrong.
    /// Returns `AuthError::WeakPassword` if the new password doesn't meet requirements.
    pub async fn change_password(
        &self,
        user_id: UserId,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), AuthError> {
        let current_hash = self
            .users
            .get_password_hash_by_id(user_id)
            .await
            .map_err(|e| match e {
                RepositoryError::NotFound => AuthError::UserNotFound,
                other => AuthError::Database(other),
            })?;

        verify_password(current_password, &current_hash)?;
        validate_password(new_password)?;

        let new_hash = hash_password(new_password)?;
        self.users.set_password_hash(user_id, &new_hash).await?;

        Ok(())
    }

    /// Start the password reset flow.
    ///
    /// Returns the reset token when an account matched and `None` otherwise.
    /// Callers must respond identically in both cases so the endpoint cannot
    /// be used to probe which emails have accounts.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidEmail` if the email format is invalid.
    pub async fn start_password_reset(&self, email: &str) -> Result<Option<String>, AuthError> {
        let email = Email::parse(email)?;

        let token = generate_reset_token();
        let expires = Utc::now() + reset_token_ttl();

        let matched = self.users.set_reset_token(&email, &token, expires).await?;

        Ok(matched.then_some(token))
    }

    /// Check that a reset token is known and unexpired.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidResetToken` if it isn't.
    pub async fn verify_reset_token(&self, reset_token: &str) -> Result<(), AuthError> {
        self.users
            .get_by_reset_token(reset_token)
            .await?
            .map(|_| ())
            .ok_or(AuthError::InvalidResetToken)
    }

    /// Complete the password reset flow, consuming the token.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::WeakPassword` if the new password doesn't meet
    /// requirements. Returns `AuthError::InvalidResetToken` if the token is
    /// unknown, already used, or expired.
    pub async fn reset_password(
        &self,
        reset_token: &str,
        new_password: &str,
    ) -> Result<(), AuthError> {
        validate_password(new_password)?;
        let new_hash = hash_password(new_password)?;

        self.users
            .consume_reset_token(reset_token, &new_hash)
            .await
            .map_err(|e| match e {
                RepositoryError::NotFound => AuthError::InvalidResetToken,
                other => AuthError::Database(other),
            })
    }

    fn issue_token(&self, user: &User) -> Result<String, AuthError> {
        let claims = UserClaims {
            sub: user.id,
            email: user.email.clone(),
        };
        Ok(token::sign_user(claims, self.jwt_secret)?)
    }
}

/// Reject blank required fields.
fn require_field<'f>(value: &'f str, message: &str) -> Result<&'f str, AuthError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AuthError::MissingField(message.to_owned()));
    }
    Ok(trimmed)
}

/// Validate password meets requirements.
fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword(format!(
            "Password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }

    Ok(())
}

/// Hash a password using Argon2id.
fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AuthError::PasswordHash(e.to_string()))
}

/// Verify a password against a hash.
fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;
    let argon2 = Argon2::default();

    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}

/// A 64-character hex token, 32 bytes of OS randomness.
fn generate_reset_token() -> String {
    let mut bytes = [0u8; 32];
    rand::rng().fill_bytes(&mut bytes);
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_password_length_rule() {
        assert!(validate_password("short").is_err());
        assert!(validate_password("exactly8").is_ok());
        assert!(validate_password("long enough password").is_ok());
    }

    #[test]
    fn test_hash_and_verify_roundtrip() {
        let hash = hash_password("correct horse battery").unwrap();
        assert!(verify_password("correct horse battery", &hash).is_ok());
        assert!(matches!(
            verify_password("wrong password!", &hash),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_garbage_hash_is_invalid_credentials() {
        assert!(matches!(
            verify_password("anything", "not-a-phc-string"),
            Err(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_require_field_trims() {
        assert_eq!(require_field("  Ada  ", "Name is required").unwrap(), "Ada");
        assert!(matches!(
            require_field("   ", "Name is required"),
            Err(AuthError::MissingField(msg)) if msg == "Name is required"
        ));
    }

    #[test]
    fn test_reset_token_shape() {
        let token = generate_reset_token();
        assert_eq!(token.len(), 64);
        assert!(token.chars().all(|c| c.is_ascii_hexdigit()));

        // Two draws should essentially never collide.
        assert_ne!(token, generate_reset_token());
    }
}
