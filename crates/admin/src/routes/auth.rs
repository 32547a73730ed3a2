//! Admin account routes under `/api/admin`.
//!
//! Login, token validation, account creation, and password change. All
//! responses follow the `{"success": true, ...}` envelope; failures go
//! through [`AppError`](crate::error::AppError).

use axum::{Json, extract::State};
use serde::Deserialize;
use serde_json::{Value, json};

use tamarind_core::{AdminPermissions, AdminRole};

use crate::error::Result;
use crate::middleware::{Capability, RequireAdmin, RequireSuperAdmin, ensure_permission};
use crate::services::auth::{AdminAuthService, CreateAdminRequest};
use crate::state::AppState;

pub(super) fn auth_service(state: &AppState) -> AdminAuthService<'_> {
    use secrecy::ExposeSecret;
    AdminAuthService::new(
        state.pool(),
        state.config().jwt_secret.expose_secret().as_bytes(),
    )
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// POST /api/admin/login
///
/// Issues an 8-hour token carrying the role and permission grants.
///
/// # Errors
///
/// Returns 401 for a wrong email/password pair, 403 for a disabled account.
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<Value>> {
    let auth = auth_service(&state);
    let (admin, token) = auth.login(&body.email, &body.password).await?;

    tracing::info!(admin_id = %admin.id, "admin logged in");

    Ok(Json(json!({
        "success": true,
        "token": token,
        "admin": admin,
    })))
}

/// GET /api/admin/validate
///
/// Confirms the presented token and returns the live account record.
///
/// # Errors
///
/// Returns 401 for a missing, expired, or malformed token.
pub async fn validate(
    State(state): State<AppState>,
    RequireAdmin(claims): RequireAdmin,
) -> Result<Json<Value>> {
    let admin = auth_service(&state).get_admin(claims.sub).await?;

    Ok(Json(json!({
        "success": true,
        "admin": admin,
    })))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRequest {
    pub username: String,
    pub email: String,
    pub name: String,
    pub password: String,
    #[serde(default = "default_role")]
    pub role: AdminRole,
    /// Explicit grant; omitted means the role's standard grant.
    pub permissions: Option<AdminPermissions>,
}

const fn default_role() -> AdminRole {
    AdminRole::Admin
}

/// POST /api/admin/create
///
/// # Errors
///
/// Returns 403 without the account management permission, 400 for
/// validation failures, 409 for a duplicate email or username.
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(claims): RequireAdmin,
    Json(body): Json<CreateRequest>,
) -> Result<Json<Value>> {
    ensure_permission(&claims, Capability::ManageUsers)?;

    let admin = auth_service(&state)
        .create_admin(CreateAdminRequest {
            username: &body.username,
            email: &body.email,
            name: &body.name,
            password: &body.password,
            role: body.role,
            permissions: body.permissions,
        })
        .await?;

    tracing::info!(admin_id = %admin.id, created_by = %claims.sub, "admin account created");

    Ok(Json(json!({
        "success": true,
        "admin": admin,
    })))
}

/// GET /api/admin/admins
///
/// The full account list, super admins only.
///
/// # Errors
///
/// Returns 403 unless the caller holds the `super_admin` role.
pub async fn list(
    State(state): State<AppState>,
    RequireSuperAdmin(_claims): RequireSuperAdmin,
) -> Result<Json<Value>> {
    let admins = auth_service(&state).list_admins().await?;

    Ok(Json(json!({
        "success": true,
        "admins": admins,
    })))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

/// PUT /api/admin/change-password
///
/// # Errors
///
/// Returns 401 for a wrong current password, 400 for a weak new one.
pub async fn change_password(
    State(state): State<AppState>,
    RequireAdmin(claims): RequireAdmin,
    Json(body): Json<ChangePasswordRequest>,
) -> Result<Json<Value>> {
    auth_service(&state)
        .change_password(claims.sub, &body.current_password, &body.new_password)
        .await?;

    Ok(Json(json!({
        "success": true,
        "message": "Password updated",
    })))
}
