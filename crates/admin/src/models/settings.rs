//! Restaurant settings, the singleton row managed from the admin panel.
//!
//! The panel edits settings either wholesale (PUT) or one section at a
//! time (PATCH with a tagged [`SettingsSection`] body).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use tamarind_core::Price;

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

/// Identity and contact details.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneralSettings {
    pub restaurant_name: String,
    pub contact_email: String,
    pub phone_number: String,
    pub address: String,
}

/// Opening hours and the open/closed switch.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HoursSettings {
    pub opening_time: String,
    pub closing_time: String,
    pub is_open: bool,
}

/// Delivery pricing and reach.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliverySettings {
    pub delivery_fee: Price,
    pub minimum_order: Price,
    pub delivery_radius: i32,
    pub estimated_delivery_time: String,
}

/// Staff notification toggles.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationSettings {
    pub email_notifications: bool,
    pub sms_notifications: bool,
    pub low_stock_alerts: bool,
    pub new_order_alerts: bool,
}

/// Currency and timezone.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionalSettings {
    pub currency: String,
    pub timezone: String,
}

/// One editable slice of the settings row.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "section", content = "values", rename_all = "camelCase")]
pub enum SettingsSection {
    General(GeneralSettings),
    Hours(HoursSettings),
    Delivery(DeliverySettings),
    Notifications(NotificationSettings),
    Regional(RegionalSettings),
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_section_body_parses_tagged() {
        let body = serde_json::json!({
            "section": "hours",
            "values": {"openingTime": "09:00", "closingTime": "22:00", "isOpen": true}
        });
        let section: SettingsSection = serde_json::from_value(body).unwrap();
        match section {
            SettingsSection::Hours(hours) => {
                assert_eq!(hours.opening_time, "09:00");
                assert!(hours.is_open);
            }
            _ => panic!("parsed wrong section"),
        }
    }

    #[test]
    fn test_unknown_section_rejected() {
        let body = serde_json::json!({"section": "branding", "values": {}});
        assert!(serde_json::from_value::<SettingsSection>(body).is_err());
    }

    #[test]
    fn test_delivery_section_uses_minor_units() {
        let body = serde_json::json!({
            "section": "delivery",
            "values": {
                "deliveryFee": 200,
                "minimumOrder": 1000,
                "deliveryRadius": 10,
                "estimatedDeliveryTime": "30-45"
            }
        });
        let section: SettingsSection = serde_json::from_value(body).unwrap();
        match section {
            SettingsSection::Delivery(delivery) => {
                assert_eq!(delivery.delivery_fee, Price::from_minor(200));
                assert_eq!(delivery.minimum_order, Price::from_minor(1000));
            }
            _ => panic!("parsed wrong section"),
        }
    }
}
