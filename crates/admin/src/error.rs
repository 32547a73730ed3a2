//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures errors to Sentry before
//! responding to the client. All route handlers should return `Result<T, AppError>`.
//! Error responses are JSON bodies of the form `{"success": false, "message": ...}`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tamarind_core::token::TokenError;
use thiserror::Error;

use crate::db::RepositoryError;
use crate::services::auth::AdminAuthError;

/// Application-level error type for the admin server.
#[derive(Debug, Error)]
pub enum AppError {
    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(#[from] RepositoryError),

    /// Authentication operation failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AdminAuthError),

    /// Token verification failed.
    #[error("Token error: {0}")]
    Token(#[from] TokenError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Caller is not authenticated.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Caller is authenticated but lacks the required permission or role.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Rate limited.
    #[error("Rate limited")]
    RateLimited,

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            Self::Database(err) => match err {
                RepositoryError::NotFound => StatusCode::NOT_FOUND,
                RepositoryError::Conflict(_) => StatusCode::CONFLICT,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Auth(err) => match err {
                AdminAuthError::InvalidCredentials | AdminAuthError::AdminNotFound => {
                    StatusCode::UNAUTHORIZED
                }
                AdminAuthError::AccountDisabled => StatusCode::FORBIDDEN,
                AdminAuthError::AdminAlreadyExists => StatusCode::CONFLICT,
                AdminAuthError::WeakPassword(_)
                | AdminAuthError::InvalidEmail(_)
                | AdminAuthError::MissingField(_) => StatusCode::BAD_REQUEST,
                AdminAuthError::Database(_)
                | AdminAuthError::PasswordHash(_)
                | AdminAuthError::Token(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Token(_) | Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::RateLimited => StatusCode::TOO_MANY_REQUESTS,
        }
    }

    /// The message sent to the client. Internal details stay server-side.
    fn client_message(&self) -> String {
        match self {
            Self::Internal(_) => "Internal server error".to_string(),
            Self::Database(err) => match err {
                RepositoryError::NotFound => "Not found".to_string(),
                RepositoryError::Conflict(msg) => msg.clone(),
                _ => "Internal server error".to_string(),
            },
            Self::Auth(err) => match err {
                AdminAuthError::InvalidCredentials | AdminAuthError::AdminNotFound => {
                    "Invalid credentials".to_string()
                }
                AdminAuthError::AccountDisabled => "This account has been disabled".to_string(),
                AdminAuthError::AdminAlreadyExists => {
                    "An admin with this email or username already exists".to_string()
                }
                AdminAuthError::WeakPassword(msg) | AdminAuthError::MissingField(msg) => {
                    msg.clone()
                }
                AdminAuthError::InvalidEmail(_) => "Invalid email address".to_string(),
                AdminAuthError::Database(_)
                | AdminAuthError::PasswordHash(_)
                | AdminAuthError::Token(_) => "Authentication error".to_string(),
            },
            Self::Token(TokenError::Expired) => "Token expired".to_string(),
            Self::Token(TokenError::Invalid) => "Invalid token".to_string(),
            Self::NotFound(what) => format!("{what} not found"),
            Self::Unauthorized(msg) | Self::Forbidden(msg) | Self::BadRequest(msg) => msg.clone(),
            Self::RateLimited => "Too many requests".to_string(),
        }
    }

    fn is_server_error(&self) -> bool {
        self.status().is_server_error()
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server errors to Sentry
        if self.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let body = serde_json::json!({
            "success": false,
            "message": self.client_message(),
        });

        (self.status(), Json(body)).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Set the Sentry user context from an admin ID.
///
/// Call this after successful authentication to associate errors with admins.
pub fn set_sentry_user(admin_id: &impl ToString, email: Option<&str>) {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            id: Some(admin_id.to_string()),
            email: email.map(String::from),
            ..Default::default()
        }));
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn get_status(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_app_error_status_codes() {
        assert_eq!(
            get_status(AppError::NotFound("test".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(AppError::Unauthorized("test".to_string())),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            get_status(AppError::Forbidden("test".to_string())),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            get_status(AppError::BadRequest("test".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::Internal("test".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_disabled_account_is_forbidden() {
        assert_eq!(
            get_status(AppError::Auth(AdminAuthError::AccountDisabled)),
            StatusCode::FORBIDDEN
        );
    }

    #[test]
    fn test_credential_errors_do_not_leak_which_field_failed() {
        assert_eq!(
            AppError::Auth(AdminAuthError::InvalidCredentials).client_message(),
            AppError::Auth(AdminAuthError::AdminNotFound).client_message(),
        );
    }
}
