//! Order placement and confirmation.
//!
//! The service owns everything between an authenticated checkout request
//! and a persisted order: trusted identity resolution, line snapshots,
//! server-side totals, and the split between cash and Stripe flows.
//!
//! Identity is never taken from the request. Name and email always come
//! from the account record; only the address may come from the request's
//! `customAddress` block, falling back to saved settings and then to
//! literal placeholders.

use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use tamarind_core::{ItemId, OrderId, PaymentMethod, PaymentStatus, Price, UserId};

use crate::db::orders::{Confirmation, NewOrder};
use crate::db::{
    ItemRepository, OrderRepository, RepositoryError, SettingsRepository, UserRepository,
};
use crate::error::{AppError, Result};
use crate::models::{AddressSettings, DeliveryDetails, Order, OrderLine, User};
use crate::services::stripe::{CheckoutRequest, StripeClient};

/// Initial order state for both payment flows. Online orders keep their
/// payment pending until the session confirms.
const INITIAL_STATUS: tamarind_core::OrderStatus = tamarind_core::OrderStatus::Confirmed;

/// A checkout request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrderRequest {
    pub items: Vec<OrderItemRequest>,
    pub payment_method: PaymentMethod,
    #[serde(default)]
    pub tax: Option<Price>,
    #[serde(default)]
    pub shipping: Option<Price>,
    #[serde(default)]
    pub custom_address: Option<CustomAddress>,
}

/// One requested order line. Lines referencing a catalog item are
/// re-priced from the catalog; free-form lines fall back to the fields
/// provided.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemRequest {
    #[serde(default)]
    pub item_id: Option<ItemId>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub price: Option<Price>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub quantity: Option<i32>,
}

/// A one-off delivery address supplied at checkout.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CustomAddress {
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
    pub phone_number: String,
    pub address_label: String,
}

/// Checkout response: the persisted order plus, for online payments, the
/// hosted payment page to redirect to.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedOrder {
    pub order: Order,
    pub checkout_url: Option<String>,
}

/// Order placement service.
pub struct OrderService<'a> {
    orders: OrderRepository<'a>,
    items: ItemRepository<'a>,
    users: UserRepository<'a>,
    settings: SettingsRepository<'a>,
    stripe: &'a StripeClient,
    frontend_url: &'a str,
}

impl<'a> OrderService<'a> {
    /// Create a new order service.
    #[must_use]
    pub const fn new(pool: &'a PgPool, stripe: &'a StripeClient, frontend_url: &'a str) -> Self {
        Self {
            orders: OrderRepository::new(pool),
            items: ItemRepository::new(pool),
            users: UserRepository::new(pool),
            settings: SettingsRepository::new(pool),
            stripe,
            frontend_url,
        }
    }

    /// Place an order for the authenticated user.
    ///
    /// Cash orders are finalized immediately (cart cleared, reward point
    /// granted). Online orders open a Stripe checkout session first and
    /// persist nothing if the session cannot be created.
    ///
    /// # Errors
    ///
    /// Returns `AppError::BadRequest` for an empty or malformed item list
    /// or negative amounts, `AppError::Payment` if Stripe rejects the
    /// session, `AppError::Database` for persistence failures.
    pub async fn place_order(
        &self,
        user_id: UserId,
        request: PlaceOrderRequest,
    ) -> Result<PlacedOrder> {
        let user = self
            .users
            .get_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User".to_owned()))?;

        let lines = self.build_lines(&request.items).await?;

        let (saved_phone, saved_address) = match self.settings.get(user_id).await? {
            Some(settings) => (settings.phone, settings.address),
            None => (String::new(), AddressSettings::default()),
        };
        let delivery = resolve_delivery(
            &user,
            &saved_phone,
            &saved_address,
            request.custom_address.as_ref(),
        );

        let tax = request.tax.unwrap_or(Price::ZERO);
        let shipping = match request.shipping {
            Some(fee) => fee,
            None => self.settings.get_or_create_restaurant().await?.delivery_fee,
        };
        let (subtotal, total) = compute_totals(&lines, tax, shipping)?;

        match request.payment_method {
            PaymentMethod::Cod => {
                let order = self
                    .orders
                    .create_cod(NewOrder {
                        user_id,
                        delivery: &delivery,
                        payment_method: PaymentMethod::Cod,
                        payment_status: PaymentStatus::Succeeded,
                        status: INITIAL_STATUS,
                        subtotal,
                        tax,
                        shipping,
                        total,
                        items: &lines,
                        payment_intent_id: None,
                        session_id: None,
                        rewards_processed: true,
                    })
                    .await?;

                Ok(PlacedOrder {
                    order,
                    checkout_url: None,
                })
            }
            PaymentMethod::Online => {
                let success_url = format!(
                    "{}/myorder/verify?success=true&session_id={{CHECKOUT_SESSION_ID}}",
                    self.frontend_url
                );
                let cancel_url = format!("{}/checkout?payment_status=cancel", self.frontend_url);

                let session = self
                    .stripe
                    .create_checkout_session(&CheckoutRequest {
                        lines: &lines,
                        delivery: &delivery,
                        success_url: &success_url,
                        cancel_url: &cancel_url,
                    })
                    .await?;

                let order = self
                    .orders
                    .create_pending(NewOrder {
                        user_id,
                        delivery: &delivery,
                        payment_method: PaymentMethod::Online,
                        payment_status: PaymentStatus::Pending,
                        status: INITIAL_STATUS,
                        subtotal,
                        tax,
                        shipping,
                        total,
                        items: &lines,
                        payment_intent_id: session.payment_intent.as_deref(),
                        session_id: Some(&session.id),
                        rewards_processed: false,
                    })
                    .await?;

                Ok(PlacedOrder {
                    order,
                    checkout_url: session.url,
                })
            }
        }
    }

    /// Confirm an online order after the customer returns from Stripe.
    ///
    /// The payment status is read back from Stripe, never from the
    /// request. Replays are safe; the first confirmation wins and later
    /// ones return the order unchanged.
    ///
    /// # Errors
    ///
    /// Returns `AppError::BadRequest` if the session is not paid,
    /// `AppError::NotFound` if no order references it.
    pub async fn confirm(&self, session_id: &str) -> Result<Confirmation> {
        let session = self.stripe.retrieve_checkout_session(session_id).await?;

        if !session.is_paid() {
            return Err(AppError::BadRequest("Payment not completed".to_owned()));
        }

        self.orders
            .confirm_by_session(&session.id)
            .await
            .map_err(|e| match e {
                RepositoryError::NotFound => AppError::NotFound("Order".to_owned()),
                other => AppError::Database(other),
            })
    }

    /// The caller's order history, newest first.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Database` if the query fails.
    pub async fn list(&self, user_id: UserId) -> Result<Vec<Order>> {
        Ok(self.orders.list_for_user(user_id).await?)
    }

    /// One order, owner only. Another user's order id is a 403, not a
    /// 404, so the two cases stay distinguishable to clients.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` for an unknown id and
    /// `AppError::Forbidden` for someone else's order.
    pub async fn get_for_user(&self, user_id: UserId, order_id: OrderId) -> Result<Order> {
        let order = self
            .orders
            .get(order_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Order".to_owned()))?;

        if order.user_id != user_id {
            return Err(AppError::Forbidden(
                "You do not have access to this order".to_owned(),
            ));
        }

        Ok(order)
    }

    /// Freeze the requested lines into order snapshots.
    ///
    /// Lines naming a known catalog item take name, price, and image from
    /// the catalog; anything client-supplied for those fields is ignored.
    async fn build_lines(&self, items: &[OrderItemRequest]) -> Result<Vec<OrderLine>> {
        if items.is_empty() {
            return Err(AppError::BadRequest("No items in order".to_owned()));
        }

        let mut lines = Vec::with_capacity(items.len());
        for requested in items {
            if requested.item_id.is_none() && requested.name.is_none() {
                return Err(AppError::BadRequest(
                    "Order item must reference an item or carry a name".to_owned(),
                ));
            }

            let quantity = requested.quantity.unwrap_or(1).max(1);

            let catalog_item = match requested.item_id {
                Some(id) => self.items.get(id).await?,
                None => None,
            };

            let line = match catalog_item {
                Some(item) => OrderLine {
                    name: item.name,
                    price: item.price,
                    image_url: item.image_url.unwrap_or_default(),
                    quantity,
                },
                None => OrderLine {
                    name: requested
                        .name
                        .clone()
                        .unwrap_or_else(|| "Unknown Item".to_owned()),
                    price: requested.price.unwrap_or(Price::ZERO),
                    image_url: requested.image_url.clone().unwrap_or_default(),
                    quantity,
                },
            };
            lines.push(line);
        }

        Ok(lines)
    }
}

/// Compute `(subtotal, total)` from frozen lines plus tax and shipping.
fn compute_totals(lines: &[OrderLine], tax: Price, shipping: Price) -> Result<(Price, Price)> {
    if tax.is_negative() || shipping.is_negative() {
        return Err(AppError::BadRequest(
            "Tax and shipping cannot be negative".to_owned(),
        ));
    }

    let subtotal = lines
        .iter()
        .try_fold(Price::ZERO, |acc, line| {
            line.line_total().and_then(|t| acc.checked_add(t))
        })
        .ok_or_else(|| AppError::BadRequest("Order total overflow".to_owned()))?;

    let total = subtotal
        .checked_add(tax)
        .and_then(|t| t.checked_add(shipping))
        .ok_or_else(|| AppError::BadRequest("Order total overflow".to_owned()))?;

    Ok((subtotal, total))
}

/// Resolve who the order is delivered to and where.
///
/// Name and email come from the account record only. The address comes
/// from the custom block when present, otherwise from saved settings,
/// with per-field placeholders for anything unset.
fn resolve_delivery(
    user: &User,
    saved_phone: &str,
    saved_address: &AddressSettings,
    custom: Option<&CustomAddress>,
) -> DeliveryDetails {
    let first_name = user.first_name().to_owned();
    let last_name = user.last_name();
    let email = user.email.clone();

    match custom {
        Some(custom) => DeliveryDetails {
            first_name,
            last_name,
            email,
            phone_number: pick(&custom.phone_number, saved_phone, "Not provided"),
            address: or_placeholder(&custom.address, "Address not set"),
            city: or_placeholder(&custom.city, "City not set"),
            state: or_placeholder(&custom.state, "State not set"),
            zip_code: or_placeholder(&custom.zip_code, "Zip not set"),
            country: or_placeholder(&custom.country, "Nigeria"),
            is_custom_address: true,
            address_label: Some(or_placeholder(&custom.address_label, "Custom Delivery")),
        },
        None => DeliveryDetails {
            first_name,
            last_name,
            email,
            phone_number: or_placeholder(saved_phone, "Not provided"),
            address: or_placeholder(&saved_address.street, "Address not set"),
            city: or_placeholder(&saved_address.city, "City not set"),
            state: or_placeholder(&saved_address.state, "State not set"),
            zip_code: or_placeholder(&saved_address.zip_code, "Zip not set"),
            country: or_placeholder(&saved_address.country, "Nigeria"),
            is_custom_address: false,
            address_label: None,
        },
    }
}

fn or_placeholder(value: &str, placeholder: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        placeholder.to_owned()
    } else {
        trimmed.to_owned()
    }
}

fn pick(first: &str, second: &str, placeholder: &str) -> String {
    if !first.trim().is_empty() {
        first.trim().to_owned()
    } else {
        or_placeholder(second, placeholder)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use tamarind_core::Email;

    fn user(name: &str) -> User {
        User {
            id: UserId::new(7),
            email: Email::parse("ada@example.com").unwrap(),
            name: name.to_owned(),
            username: "ada".to_owned(),
            reward_progress: 0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn saved_address() -> AddressSettings {
        AddressSettings {
            street: "12 Marina Rd".to_owned(),
            city: "Lagos".to_owned(),
            state: "Lagos".to_owned(),
            zip_code: "100001".to_owned(),
            country: "Nigeria".to_owned(),
        }
    }

    fn line(price: i64, quantity: i32) -> OrderLine {
        OrderLine {
            name: "x".to_owned(),
            price: Price::from_minor(price),
            image_url: String::new(),
            quantity,
        }
    }

    #[test]
    fn test_identity_always_from_account() {
        let custom = CustomAddress {
            address: "1 Other St".to_owned(),
            ..CustomAddress::default()
        };
        let delivery = resolve_delivery(
            &user("Ada Obi"),
            "0800",
            &saved_address(),
            Some(&custom),
        );

        assert_eq!(delivery.first_name, "Ada");
        assert_eq!(delivery.last_name, "Obi");
        assert_eq!(delivery.email.as_str(), "ada@example.com");
    }

    #[test]
    fn test_custom_address_fills_placeholders_and_label() {
        let custom = CustomAddress {
            address: "1 Other St".to_owned(),
            ..CustomAddress::default()
        };
        let delivery = resolve_delivery(&user("Ada"), "", &AddressSettings::default(), Some(&custom));

        assert!(delivery.is_custom_address);
        assert_eq!(delivery.address, "1 Other St");
        assert_eq!(delivery.city, "City not set");
        assert_eq!(delivery.state, "State not set");
        assert_eq!(delivery.zip_code, "Zip not set");
        assert_eq!(delivery.country, "Nigeria");
        assert_eq!(delivery.phone_number, "Not provided");
        assert_eq!(delivery.address_label.as_deref(), Some("Custom Delivery"));
    }

    #[test]
    fn test_custom_phone_falls_back_to_saved() {
        let custom = CustomAddress::default();
        let delivery = resolve_delivery(&user("Ada"), "0801", &saved_address(), Some(&custom));
        assert_eq!(delivery.phone_number, "0801");
    }

    #[test]
    fn test_saved_settings_path() {
        let delivery = resolve_delivery(&user("Ada Obi"), "0800", &saved_address(), None);

        assert!(!delivery.is_custom_address);
        assert_eq!(delivery.address, "12 Marina Rd");
        assert_eq!(delivery.city, "Lagos");
        assert_eq!(delivery.phone_number, "0800");
        assert_eq!(delivery.address_label, None);
    }

    #[test]
    fn test_empty_everything_yields_placeholders() {
        let delivery = resolve_delivery(&user(""), "", &AddressSettings::default(), None);

        assert_eq!(delivery.first_name, "Customer");
        assert_eq!(delivery.address, "Address not set");
        assert_eq!(delivery.city, "City not set");
        assert_eq!(delivery.state, "State not set");
        assert_eq!(delivery.zip_code, "Zip not set");
        assert_eq!(delivery.country, "Nigeria");
        assert_eq!(delivery.phone_number, "Not provided");
    }

    #[test]
    fn test_totals_from_snapshot() {
        let lines = vec![line(600, 2), line(400, 1)];
        let (subtotal, total) =
            compute_totals(&lines, Price::ZERO, Price::from_minor(200)).unwrap();
        assert_eq!(subtotal, Price::from_minor(1600));
        assert_eq!(total, Price::from_minor(1800));
    }

    #[test]
    fn test_negative_tax_rejected() {
        let lines = vec![line(600, 1)];
        let err = compute_totals(&lines, Price::from_minor(-1), Price::ZERO).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[test]
    fn test_total_overflow_rejected() {
        let lines = vec![line(i64::MAX, 1)];
        let err = compute_totals(&lines, Price::from_minor(1), Price::ZERO).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[test]
    fn test_line_overflow_rejected() {
        let lines = vec![line(i64::MAX, 2)];
        let err = compute_totals(&lines, Price::ZERO, Price::ZERO).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[test]
    fn test_subtotal_overflow_rejected() {
        let lines = vec![line(i64::MAX, 1), line(1, 1)];
        let err = compute_totals(&lines, Price::ZERO, Price::ZERO).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }
}
