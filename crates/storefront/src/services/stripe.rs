//! Stripe Checkout client.
//!
//! Talks to the Checkout Sessions API directly over its form-encoded
//! surface. Only the two calls the order flow needs are implemented:
//! creating a hosted checkout session and retrieving one to verify
//! payment.

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use serde::Deserialize;
use thiserror::Error;

use crate::config::StripeConfig;
use crate::models::{DeliveryDetails, OrderLine};

/// Stripe API base URL.
const BASE_URL: &str = "https://api.stripe.com/v1";

/// Errors that can occur when interacting with the Stripe API.
#[derive(Debug, Error)]
pub enum StripeError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error response.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Failed to parse a response or build the client.
    #[error("Parse error: {0}")]
    Parse(String),
}

/// A hosted checkout session, as returned by Stripe.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutSession {
    pub id: String,
    /// Hosted payment page URL. Present on freshly created sessions.
    pub url: Option<String>,
    pub payment_intent: Option<String>,
    /// `"paid"`, `"unpaid"`, or `"no_payment_required"`.
    pub payment_status: String,
}

impl CheckoutSession {
    /// Whether the customer completed payment.
    #[must_use]
    pub fn is_paid(&self) -> bool {
        self.payment_status == "paid"
    }
}

/// What the order flow needs to open a checkout session.
pub struct CheckoutRequest<'r> {
    pub lines: &'r [OrderLine],
    pub delivery: &'r DeliveryDetails,
    pub success_url: &'r str,
    pub cancel_url: &'r str,
}

/// Stripe API client.
#[derive(Clone)]
pub struct StripeClient {
    client: reqwest::Client,
    currency: String,
}

impl StripeClient {
    /// Create a new Stripe API client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &StripeConfig) -> Result<Self, StripeError> {
        let mut headers = HeaderMap::new();

        let auth_value = format!("Bearer {}", config.secret_key.expose_secret());
        let mut auth_header = HeaderValue::from_str(&auth_value)
            .map_err(|e| StripeError::Parse(format!("Invalid API key format: {e}")))?;
        auth_header.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth_header);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            currency: config.currency.clone(),
        })
    }

    /// Create a hosted checkout session for an order.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails or the response cannot be
    /// parsed.
    pub async fn create_checkout_session(
        &self,
        request: &CheckoutRequest<'_>,
    ) -> Result<CheckoutSession, StripeError> {
        let url = format!("{BASE_URL}/checkout/sessions");
        let form = session_form(request, &self.currency);

        let response = self.client.post(&url).form(&form).send().await?;

        parse_session(response).await
    }

    /// Retrieve an existing checkout session to check its payment status.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails or the response cannot be
    /// parsed.
    pub async fn retrieve_checkout_session(
        &self,
        session_id: &str,
    ) -> Result<CheckoutSession, StripeError> {
        let url = format!("{BASE_URL}/checkout/sessions/{session_id}");

        let response = self.client.get(&url).send().await?;

        parse_session(response).await
    }
}

async fn parse_session(response: reqwest::Response) -> Result<CheckoutSession, StripeError> {
    let status = response.status();

    if !status.is_success() {
        let message = response.text().await.unwrap_or_default();
        return Err(StripeError::Api {
            status: status.as_u16(),
            message,
        });
    }

    response
        .json()
        .await
        .map_err(|e| StripeError::Parse(e.to_string()))
}

/// Build the form-encoded body for a Checkout Sessions create call.
///
/// Amounts are already in the currency's minor unit, which is what Stripe's
/// `unit_amount` expects. The `{CHECKOUT_SESSION_ID}` placeholder in the
/// success URL is substituted by Stripe, not by us.
fn session_form(request: &CheckoutRequest<'_>, currency: &str) -> Vec<(String, String)> {
    let mut form = vec![
        ("mode".to_owned(), "payment".to_owned()),
        ("success_url".to_owned(), request.success_url.to_owned()),
        ("cancel_url".to_owned(), request.cancel_url.to_owned()),
        (
            "customer_email".to_owned(),
            request.delivery.email.to_string(),
        ),
        (
            "metadata[firstName]".to_owned(),
            request.delivery.first_name.clone(),
        ),
        (
            "metadata[lastName]".to_owned(),
            request.delivery.last_name.clone(),
        ),
        (
            "metadata[email]".to_owned(),
            request.delivery.email.to_string(),
        ),
        (
            "metadata[phone]".to_owned(),
            request.delivery.phone_number.clone(),
        ),
    ];

    for (i, line) in request.lines.iter().enumerate() {
        form.push((
            format!("line_items[{i}][price_data][currency]"),
            currency.to_owned(),
        ));
        form.push((
            format!("line_items[{i}][price_data][product_data][name]"),
            line.name.clone(),
        ));
        form.push((
            format!("line_items[{i}][price_data][unit_amount]"),
            line.price.as_minor().to_string(),
        ));
        form.push((format!("line_items[{i}][quantity]"), line.quantity.to_string()));
    }

    form
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tamarind_core::{Email, Price};

    fn delivery() -> DeliveryDetails {
        DeliveryDetails {
            first_name: "Ada".to_owned(),
            last_name: "Obi".to_owned(),
            email: Email::parse("ada@example.com").unwrap(),
            phone_number: "0800000000".to_owned(),
            address: "12 Marina Rd".to_owned(),
            city: "Lagos".to_owned(),
            state: "Lagos".to_owned(),
            zip_code: "100001".to_owned(),
            country: "Nigeria".to_owned(),
            is_custom_address: false,
            address_label: None,
        }
    }

    fn lines() -> Vec<OrderLine> {
        vec![
            OrderLine {
                name: "Meat Pie".to_owned(),
                price: Price::from_minor(60000),
                image_url: "/uploads/food1.jpg".to_owned(),
                quantity: 2,
            },
            OrderLine {
                name: "Chin Chin".to_owned(),
                price: Price::from_minor(40000),
                image_url: String::new(),
                quantity: 1,
            },
        ]
    }

    fn value<'f>(form: &'f [(String, String)], key: &str) -> &'f str {
        form.iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .unwrap()
    }

    #[test]
    fn test_session_form_lines() {
        let lines = lines();
        let delivery = delivery();
        let request = CheckoutRequest {
            lines: &lines,
            delivery: &delivery,
            success_url: "https://shop.test/myorder/verify?success=true&session_id={CHECKOUT_SESSION_ID}",
            cancel_url: "https://shop.test/checkout?payment_status=cancel",
        };

        let form = session_form(&request, "ngn");

        assert_eq!(value(&form, "mode"), "payment");
        assert_eq!(value(&form, "line_items[0][price_data][currency]"), "ngn");
        assert_eq!(
            value(&form, "line_items[0][price_data][product_data][name]"),
            "Meat Pie"
        );
        assert_eq!(
            value(&form, "line_items[0][price_data][unit_amount]"),
            "60000"
        );
        assert_eq!(value(&form, "line_items[0][quantity]"), "2");
        assert_eq!(
            value(&form, "line_items[1][price_data][unit_amount]"),
            "40000"
        );
        assert_eq!(value(&form, "line_items[1][quantity]"), "1");
    }

    #[test]
    fn test_session_form_customer_fields() {
        let lines = lines();
        let delivery = delivery();
        let request = CheckoutRequest {
            lines: &lines,
            delivery: &delivery,
            success_url: "https://shop.test/ok",
            cancel_url: "https://shop.test/cancel",
        };

        let form = session_form(&request, "ngn");

        assert_eq!(value(&form, "customer_email"), "ada@example.com");
        assert_eq!(value(&form, "metadata[firstName]"), "Ada");
        assert_eq!(value(&form, "metadata[lastName]"), "Obi");
        assert_eq!(value(&form, "metadata[phone]"), "0800000000");
    }

    #[test]
    fn test_paid_check() {
        let session = CheckoutSession {
            id: "cs_test_1".to_owned(),
            url: None,
            payment_intent: Some("pi_1".to_owned()),
            payment_status: "paid".to_owned(),
        };
        assert!(session.is_paid());

        let unpaid = CheckoutSession {
            payment_status: "unpaid".to_owned(),
            ..session
        };
        assert!(!unpaid.is_paid());
    }
}
