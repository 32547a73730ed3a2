//! Authentication error types.

use thiserror::Error;

use tamarind_core::token::TokenError;

use crate::db::RepositoryError;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] tamarind_core::EmailError),

    /// Invalid credentials (wrong password or unknown account).
    #[error("invalid credentials")]
    InvalidCredentials,

    /// User not found.
    #[error("user not found")]
    UserNotFound,

    /// An account already exists for this email.
    #[error("user already exists")]
    UserAlreadyExists,

    /// Password too weak or invalid.
    #[error("password validation failed: {0}")]
    WeakPassword(String),

    /// A required registration field was empty.
    #[error("missing field: {0}")]
    MissingField(String),

    /// Reset token is unknown, already used, or expired.
    #[error("invalid reset token")]
    InvalidResetToken,

    /// Repository/database error.
    #[error("database error: {0}")]
    Database(#[from] RepositoryError),

    /// Password hashing error.
    #[error("password hashing error: {0}")]
    PasswordHash(String),

    /// Token signing error.
    #[error("token error: {0}")]
    Token(#[from] TokenError),
}
