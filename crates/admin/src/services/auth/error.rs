//! Admin authentication errors.

use thiserror::Error;

use tamarind_core::{EmailError, token::TokenError};

use crate::db::RepositoryError;

/// Errors from admin authentication operations.
#[derive(Debug, Error)]
pub enum AdminAuthError {
    /// Email format is invalid.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// Wrong email/password combination.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Admin account doesn't exist.
    #[error("admin not found")]
    AdminNotFound,

    /// Account exists but has been deactivated.
    #[error("account disabled")]
    AccountDisabled,

    /// Email or username is already taken.
    #[error("admin already exists")]
    AdminAlreadyExists,

    /// Password doesn't meet requirements.
    #[error("{0}")]
    WeakPassword(String),

    /// A required field was blank.
    #[error("{0}")]
    MissingField(String),

    /// Database operation failed.
    #[error("database error: {0}")]
    Database(#[from] RepositoryError),

    /// Password hashing failed.
    #[error("password hashing error: {0}")]
    PasswordHash(String),

    /// Token signing failed.
    #[error("token error: {0}")]
    Token(#[from] TokenError),
}
