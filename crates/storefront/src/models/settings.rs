//! User and restaurant settings.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use tamarind_core::{Price, UserId};

/// Valid theme choices.
pub const THEMES: &[&str] = &["light", "dark", "auto"];

/// Valid default payment methods for [`PaymentPrefs`].
pub const DEFAULT_PAYMENT_METHODS: &[&str] = &["card", "cod"];

/// A user's saved delivery address. Stored as JSONB; empty strings mean
/// "not set" and fall back to placeholders at checkout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AddressSettings {
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
}

/// Notification channel opt-ins. Stored as JSONB.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NotificationPrefs {
    pub email: bool,
    pub sms: bool,
    pub push: bool,
    pub rewards_reminders: bool,
}

impl Default for NotificationPrefs {
    fn default() -> Self {
        Self {
            email: true,
            sms: false,
            push: true,
            rewards_reminders: true,
        }
    }
}

/// Checkout defaults. Stored as JSONB.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PaymentPrefs {
    /// One of [`DEFAULT_PAYMENT_METHODS`].
    pub default_method: String,
    pub default_card_id: String,
}

impl Default for PaymentPrefs {
    fn default() -> Self {
        Self {
            default_method: "cod".to_string(),
            default_card_id: String::new(),
        }
    }
}

/// Per-user preferences, upserted lazily on first access.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct UserSettings {
    pub user_id: UserId,
    pub phone: String,
    #[sqlx(json)]
    pub address: AddressSettings,
    #[sqlx(json)]
    pub notifications: NotificationPrefs,
    #[sqlx(json)]
    pub payment: PaymentPrefs,
    /// One of [`THEMES`].
    pub theme: String,
    pub current_tier: String,
    pub updated_at: DateTime<Utc>,
}

/// Restaurant-wide settings, a fetch-or-create singleton row.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantSettings {
    pub restaurant_name: String,
    pub contact_email: String,
    pub phone_number: String,
    pub address: String,
    /// Opening hour, `HH:MM`.
    pub opening_time: String,
    /// Closing hour, `HH:MM`.
    pub closing_time: String,
    pub is_open: bool,
    pub delivery_fee: Price,
    pub minimum_order: Price,
    /// Delivery radius in kilometers.
    pub delivery_radius: i32,
    /// Customer-facing delivery estimate in minutes, e.g. `30-45`.
    pub estimated_delivery_time: String,
    pub email_notifications: bool,
    pub sms_notifications: bool,
    pub low_stock_alerts: bool,
    pub new_order_alerts: bool,
    pub currency: String,
    pub timezone: String,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_notification_defaults() {
        let prefs = NotificationPrefs::default();
        assert!(prefs.email);
        assert!(!prefs.sms);
        assert!(prefs.push);
        assert!(prefs.rewards_reminders);
    }

    #[test]
    fn test_payment_defaults() {
        let prefs = PaymentPrefs::default();
        assert_eq!(prefs.default_method, "cod");
        assert!(prefs.default_card_id.is_empty());
    }

    #[test]
    fn test_partial_address_deserializes_with_defaults() {
        let addr: AddressSettings = serde_json::from_str(r#"{"street": "1 Fela Way"}"#).unwrap();
        assert_eq!(addr.street, "1 Fela Way");
        assert_eq!(addr.city, "");
    }

    #[test]
    fn test_wire_spelling() {
        let json = serde_json::to_value(NotificationPrefs::default()).unwrap();
        assert!(json.get("rewardsReminders").is_some());
        let json = serde_json::to_value(AddressSettings::default()).unwrap();
        assert!(json.get("zipCode").is_some());
    }
}
