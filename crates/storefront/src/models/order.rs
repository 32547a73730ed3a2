//! Order domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use tamarind_core::{Email, OrderId, OrderStatus, PaymentMethod, PaymentStatus, Price, UserId};

/// A single order line, frozen at checkout.
///
/// Value-copied from the catalog so later price or image edits never
/// rewrite order history. Stored in Postgres as JSONB.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    pub name: String,
    /// Unit price at checkout time, minor currency units.
    pub price: Price,
    pub image_url: String,
    pub quantity: i32,
}

impl OrderLine {
    /// Line total (`price * quantity`), `None` on overflow.
    #[must_use]
    pub fn line_total(&self) -> Option<Price> {
        self.price.checked_mul(i64::from(self.quantity))
    }
}

/// Where and to whom an order is delivered.
///
/// Name and email always come from the account record; address fields come
/// from a one-off custom address or the user's saved settings.
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

/// A customer order.
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
    /// Guard against double-counting loyalty points on payment confirm.
    pub rewards_processed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_line_total() {
        let line = OrderLine {
            name: "Meat Pie".to_string(),
            price: Price::from_minor(600),
            image_url: String::new(),
            quantity: 2,
        };
        assert_eq!(line.line_total(), Some(Price::from_minor(1200)));
    }

    #[test]
    fn test_line_total_overflow_is_none() {
        let line = OrderLine {
            name: "Meat Pie".to_string(),
            price: Price::from_minor(i64::MAX),
            image_url: String::new(),
            quantity: 2,
        };
        assert_eq!(line.line_total(), None);
    }

    #[test]
    fn test_order_line_wire_shape() {
        let line = OrderLine {
            name: "Meat Pie".to_string(),
            price: Price::from_minor(600),
            image_url: "/uploads/food1.jpg".to_string(),
            quantity: 2,
        };
        let json = serde_json::to_value(&line).unwrap();
        assert_eq!(json["name"], "Meat Pie");
        assert_eq!(json["price"], 600);
        assert_eq!(json["imageUrl"], "/uploads/food1.jpg");
        assert_eq!(json["quantity"], 2);
    }
}
