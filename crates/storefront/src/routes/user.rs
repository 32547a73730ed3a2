//! Customer account routes under `/api/user`.
//!
//! Registration, login, token validation, reward tier lookup, and the
//! password reset flow. All responses follow the `{"success": true, ...}`
//! envelope; failures go through [`AppError`].

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;
use serde_json::{Value, json};

use tamarind_core::rewards::tier_for_points;

use crate::error::Result;
use crate::middleware::RequireUser;
use crate::services::auth::AuthService;
use crate::state::AppState;

pub(super) fn auth_service(state: &AppState) -> AuthService<'_> {
    use secrecy::ExposeSecret;
    AuthService::new(
        state.pool(),
        state.config().jwt_secret.expose_secret().as_bytes(),
    )
}

// ============================================================================
// Registration and login
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub username: String,
    pub email: String,
    pub password: String,
}

/// POST /api/user/register
///
/// # Errors
///
/// Returns 400 for validation failures, 409 for a duplicate email.
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<Json<Value>> {
    let auth = auth_service(&state);
    let (user, token) = auth
        .register(&body.email, &body.password, &body.name, &body.username)
        .await?;

    tracing::info!(user_id = %user.id, "new user registered");

    Ok(Json(json!({
        "success": true,
        "token": token,
        "user": user,
    })))
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// POST /api/user/login
///
/// # Errors
///
/// Returns 401 for a wrong email/password pair.
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<Value>> {
    let auth = auth_service(&state);
    let (user, token) = auth.login(&body.email, &body.password).await?;

    Ok(Json(json!({
        "success": true,
        "token": token,
        "user": user,
    })))
}

/// GET /api/user/validate
///
/// Confirms the presented token and returns the live account record.
///
/// # Errors
///
/// Returns 401 for a missing, expired, or malformed token.
pub async fn validate(
    State(state): State<AppState>,
    RequireUser(claims): RequireUser,
) -> Result<Json<Value>> {
    let user = auth_service(&state).get_user(claims.sub).await?;

    Ok(Json(json!({
        "success": true,
        "user": user,
    })))
}

/// GET /api/user/rewards
///
/// # Errors
///
/// Returns 401 without a valid token.
pub async fn rewards(
    State(state): State<AppState>,
    RequireUser(claims): RequireUser,
) -> Result<Json<Value>> {
    let user = auth_service(&state).get_user(claims.sub).await?;
    let rewards = tier_for_points(user.reward_progress);

    Ok(Json(json!({
        "success": true,
        "rewards": rewards,
    })))
}

// ============================================================================
// Password reset
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

/// POST /api/user/forgot-password
///
/// The response is identical whether or not the email has an account, so
/// the endpoint cannot be used to enumerate registered addresses. The
/// token itself goes out through the mail pipeline, not the response.
///
/// # Errors
///
/// Returns 400 for a malformed email.
pub async fn forgot_password(
    State(state): State<AppState>,
    Json(body): Json<ForgotPasswordRequest>,
) -> Result<Json<Value>> {
    let token = auth_service(&state).start_password_reset(&body.email).await?;

    if let Some(token) = token {
        // Stand-in for the mail dispatch; operators can recover the link
        // from the logs in environments without a mail provider.
        tracing::debug!(email = %body.email, reset_token = %token, "password reset requested");
    }

    Ok(Json(json!({
        "success": true,
        "message": "If an account exists for that email, a reset link has been sent",
    })))
}

/// GET /api/user/verify-reset-token/{token}
///
/// # Errors
///
/// Returns 400 when the token is unknown, used, or expired.
pub async fn verify_reset_token(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<Json<Value>> {
    auth_service(&state).verify_reset_token(&token).await?;

    Ok(Json(json!({ "success": true })))
}

#[derive(Debug, Deserialize)]
pub struct ResetPasswordRequest {
    pub token: String,
    pub password: String,
}

/// POST /api/user/reset-password
///
/// # Errors
///
/// Returns 400 for a weak password or an invalid token.
pub async fn reset_password(
    State(state): State<AppState>,
    Json(body): Json<ResetPasswordRequest>,
) -> Result<Json<Value>> {
    auth_service(&state)
        .reset_password(&body.token, &body.password)
        .await?;

    Ok(Json(json!({
        "success": true,
        "message": "Password has been reset",
    })))
}
