//! User settings routes under `/api/settings`. All require a customer
//! token. The settings row is upserted lazily on first read.

use axum::{Json, extract::State};
use serde::Deserialize;
use serde_json::{Value, json};

use tamarind_core::rewards::tier_for_points;

use crate::db::SettingsRepository;
use crate::error::{AppError, Result};
use crate::middleware::RequireUser;
use crate::models::{AddressSettings, DEFAULT_PAYMENT_METHODS, NotificationPrefs, PaymentPrefs, THEMES};
use crate::routes::user::auth_service;
use crate::state::AppState;

/// GET /api/settings
///
/// The whole settings page payload: account record, preferences, and
/// reward progress.
///
/// # Errors
///
/// Returns 401 without a valid token.
pub async fn get(
    State(state): State<AppState>,
    RequireUser(claims): RequireUser,
) -> Result<Json<Value>> {
    let user = auth_service(&state).get_user(claims.sub).await?;
    let settings = SettingsRepository::new(state.pool())
        .get_or_create(claims.sub)
        .await?;
    let rewards = tier_for_points(user.reward_progress);

    Ok(Json(json!({
        "success": true,
        "user": user,
        "settings": settings,
        "rewards": rewards,
    })))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileRequest {
    pub name: Option<String>,
    pub username: Option<String>,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: AddressSettings,
}

/// PUT /api/settings/profile
///
/// Updates the account's display fields and the saved delivery address
/// in one call. Omitted name/username keep their current values.
///
/// # Errors
///
/// Returns 400 if a provided name or username is blank.
pub async fn update_profile(
    State(state): State<AppState>,
    RequireUser(claims): RequireUser,
    Json(body): Json<ProfileRequest>,
) -> Result<Json<Value>> {
    let auth = auth_service(&state);
    let current = auth.get_user(claims.sub).await?;

    let name = body.name.as_deref().unwrap_or(&current.name);
    let username = body.username.as_deref().unwrap_or(&current.username);
    let user = auth.update_profile(claims.sub, name, username).await?;

    let settings = SettingsRepository::new(state.pool())
        .update_profile(claims.sub, &body.phone, &body.address)
        .await?;

    Ok(Json(json!({
        "success": true,
        "user": user,
        "settings": settings,
    })))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

/// PUT /api/settings/password
///
/// # Errors
///
/// Returns 401 for a wrong current password, 400 for a weak new one.
pub async fn change_password(
    State(state): State<AppState>,
    RequireUser(claims): RequireUser,
    Json(body): Json<PasswordRequest>,
) -> Result<Json<Value>> {
    auth_service(&state)
        .change_password(claims.sub, &body.current_password, &body.new_password)
        .await?;

    Ok(Json(json!({
        "success": true,
        "message": "Password updated",
    })))
}

/// PUT /api/settings/notifications
///
/// # Errors
///
/// Returns 401 without a valid token.
pub async fn update_notifications(
    State(state): State<AppState>,
    RequireUser(claims): RequireUser,
    Json(prefs): Json<NotificationPrefs>,
) -> Result<Json<Value>> {
    let settings = SettingsRepository::new(state.pool())
        .update_notifications(claims.sub, prefs)
        .await?;

    Ok(Json(json!({ "success": true, "settings": settings })))
}

/// PUT /api/settings/payment
///
/// # Errors
///
/// Returns 400 for an unknown default payment method.
pub async fn update_payment(
    State(state): State<AppState>,
    RequireUser(claims): RequireUser,
    Json(prefs): Json<PaymentPrefs>,
) -> Result<Json<Value>> {
    if !DEFAULT_PAYMENT_METHODS.contains(&prefs.default_method.as_str()) {
        return Err(AppError::BadRequest(format!(
            "Unknown payment method '{}'",
            prefs.default_method
        )));
    }

    let settings = SettingsRepository::new(state.pool())
        .update_payment(claims.sub, &prefs)
        .await?;

    Ok(Json(json!({ "success": true, "settings": settings })))
}

#[derive(Debug, Deserialize)]
pub struct ThemeRequest {
    pub theme: String,
}

/// PUT /api/settings/theme
///
/// # Errors
///
/// Returns 400 for a theme outside light|dark|auto.
pub async fn update_theme(
    State(state): State<AppState>,
    RequireUser(claims): RequireUser,
    Json(body): Json<ThemeRequest>,
) -> Result<Json<Value>> {
    if !THEMES.contains(&body.theme.as_str()) {
        return Err(AppError::BadRequest(format!(
            "Unknown theme '{}'",
            body.theme
        )));
    }

    let settings = SettingsRepository::new(state.pool())
        .update_theme(claims.sub, &body.theme)
        .await?;

    Ok(Json(json!({ "success": true, "settings": settings })))
}

/// GET /api/settings/rewards
///
/// Same payload as `/api/user/rewards`; kept for the settings page.
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

    Ok(Json(json!({ "success": true, "rewards": rewards })))
}
