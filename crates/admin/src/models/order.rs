//! Order types read from the storefront schema.
//!
//! The admin panel never creates orders; it lists them and moves their
//! fulfillment status forward. The shapes mirror what the storefront writes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use tamarind_core::{Email, OrderId, OrderStatus, PaymentMethod, PaymentStatus, Price, UserId};

/// A single order line as snapshotted at checkout. Stored as JSONB.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    pub name: String,
    /// Unit price at checkout time, minor currency units.
    pub price: Price,
    pub image_url: String,
    pub quantity: i32,
}

/// Delivery recipient and address for an order.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryDetails {
    pub first_name: String,
    pub last_name: String,
    pub email: Email,
    pub phone_number: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
    pub is_custom_address: bool,
    pub address_label: Option<String>,
}

/// A customer order as seen by the admin panel.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub user_id: UserId,
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub delivery: DeliveryDetails,
    pub payment_method: PaymentMethod,
    pub payment_status: PaymentStatus,
    pub status: OrderStatus,
    pub subtotal: Price,
    pub tax: Price,
    pub shipping: Price,
    pub total: Price,
    #[sqlx(json)]
    pub items: Vec<OrderLine>,
    pub payment_intent_id: Option<String>,
    pub session_id: Option<String>,
    pub rewards_processed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
