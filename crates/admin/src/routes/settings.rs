//! Restaurant settings routes under `/api/admin/settings`.

use axum::{Json, extract::State};
use serde::Deserialize;
use serde_json::{Value, json};

use tamarind_core::Price;

use crate::db::SettingsRepository;
use crate::error::Result;
use crate::middleware::{Capability, RequireAdmin, ensure_permission};
use crate::models::{RestaurantSettings, SettingsSection};
use crate::state::AppState;

/// GET /api/admin/settings
///
/// # Errors
///
/// Returns 403 without the settings management permission.
pub async fn get(
    State(state): State<AppState>,
    RequireAdmin(claims): RequireAdmin,
) -> Result<Json<Value>> {
    ensure_permission(&claims, Capability::ManageSettings)?;

    let settings = SettingsRepository::new(state.pool()).get_or_create().await?;

    Ok(Json(json!({
        "success": true,
        "settings": settings,
    })))
}

/// Full settings payload for PUT. Same fields as the stored row, minus
/// the server-managed timestamp.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRequest {
    pub restaurant_name: String,
    pub contact_email: String,
    pub phone_number: String,
    pub address: String,
    pub opening_time: String,
    pub closing_time: String,
    pub is_open: bool,
    pub delivery_fee: Price,
    pub minimum_order: Price,
    pub delivery_radius: i32,
    pub estimated_delivery_time: String,
    pub email_notifications: bool,
    pub sms_notifications: bool,
    pub low_stock_alerts: bool,
    pub new_order_alerts: bool,
    pub currency: String,
    pub timezone: String,
}

/// PUT /api/admin/settings
///
/// Replaces every editable field at once.
///
/// # Errors
///
/// Returns 403 without the settings management permission.
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(claims): RequireAdmin,
    Json(body): Json<UpdateRequest>,
) -> Result<Json<Value>> {
    ensure_permission(&claims, Capability::ManageSettings)?;

    let settings = RestaurantSettings {
        restaurant_name: body.restaurant_name,
        contact_email: body.contact_email,
        phone_number: body.phone_number,
        address: body.address,
        opening_time: body.opening_time,
        closing_time: body.closing_time,
        is_open: body.is_open,
        delivery_fee: body.delivery_fee,
        minimum_order: body.minimum_order,
        delivery_radius: body.delivery_radius,
        estimated_delivery_time: body.estimated_delivery_time,
        email_notifications: body.email_notifications,
        sms_notifications: body.sms_notifications,
        low_stock_alerts: body.low_stock_alerts,
        new_order_alerts: body.new_order_alerts,
        currency: body.currency,
        timezone: body.timezone,
        updated_at: chrono::Utc::now(),
    };

    let updated = SettingsRepository::new(state.pool()).replace(&settings).await?;

    tracing::info!(admin_id = %claims.sub, "restaurant settings replaced");

    Ok(Json(json!({
        "success": true,
        "settings": updated,
    })))
}

/// PATCH /api/admin/settings/section
///
/// Updates one section (`general`, `hours`, `delivery`, `notifications`,
/// or `regional`) and leaves the rest untouched.
///
/// # Errors
///
/// Returns 403 without the settings management permission, 422 for an
/// unknown section name.
pub async fn update_section(
    State(state): State<AppState>,
    RequireAdmin(claims): RequireAdmin,
    Json(section): Json<SettingsSection>,
) -> Result<Json<Value>> {
    ensure_permission(&claims, Capability::ManageSettings)?;

    let repo = SettingsRepository::new(state.pool());
    let updated = match &section {
        SettingsSection::General(general) => repo.update_general(general).await?,
        SettingsSection::Hours(hours) => repo.update_hours(hours).await?,
        SettingsSection::Delivery(delivery) => repo.update_delivery(delivery).await?,
        SettingsSection::Notifications(notifications) => {
            repo.update_notifications(*notifications).await?
        }
        SettingsSection::Regional(regional) => repo.update_regional(regional).await?,
    };

    Ok(Json(json!({
        "success": true,
        "settings": updated,
    })))
}
