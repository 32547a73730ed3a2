//! Order routes under `/api/orders`. All require a customer token.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use serde_json::{Value, json};

use tamarind_core::OrderId;

use crate::error::Result;
use crate::middleware::RequireUser;
use crate::services::orders::{OrderService, PlaceOrderRequest};
use crate::state::AppState;

fn order_service(state: &AppState) -> OrderService<'_> {
    OrderService::new(state.pool(), state.stripe(), &state.config().frontend_url)
}

/// POST /api/orders
///
/// Cash orders come back final; online orders come back with the Stripe
/// checkout URL to redirect to.
///
/// # Errors
///
/// Returns 400 for an empty or malformed order, 502 if Stripe rejects
/// the session.
pub async fn place(
    State(state): State<AppState>,
    RequireUser(claims): RequireUser,
    Json(body): Json<PlaceOrderRequest>,
) -> Result<Json<Value>> {
    let placed = order_service(&state).place_order(claims.sub, body).await?;

    tracing::info!(
        order_id = %placed.order.id,
        method = %placed.order.payment_method,
        total = %placed.order.total,
        "order placed"
    );

    Ok(Json(json!({
        "success": true,
        "order": placed.order,
        "checkoutUrl": placed.checkout_url,
    })))
}

#[derive(Debug, Deserialize)]
pub struct ConfirmQuery {
    pub session_id: String,
}

/// GET /api/orders/confirm?session_id=
///
/// Verifies the payment with Stripe and finalizes the order. Safe to
/// call repeatedly; only the first confirmation changes anything.
///
/// # Errors
///
/// Returns 400 if the session is unpaid, 404 if no order references it.
pub async fn confirm(
    State(state): State<AppState>,
    RequireUser(_claims): RequireUser,
    Query(query): Query<ConfirmQuery>,
) -> Result<Json<Value>> {
    let confirmation = order_service(&state).confirm(&query.session_id).await?;

    if confirmation.newly_confirmed {
        tracing::info!(order_id = %confirmation.order.id, "online order confirmed");
    }

    Ok(Json(json!({
        "success": true,
        "order": confirmation.order,
    })))
}

/// GET /api/orders
///
/// # Errors
///
/// Returns 401 without a valid token.
pub async fn list(
    State(state): State<AppState>,
    RequireUser(claims): RequireUser,
) -> Result<Json<Value>> {
    let orders = order_service(&state).list(claims.sub).await?;

    Ok(Json(json!({ "success": true, "orders": orders })))
}

/// GET /api/orders/{id}
///
/// # Errors
///
/// Returns 404 for an unknown id, 403 for someone else's order.
pub async fn get(
    State(state): State<AppState>,
    RequireUser(claims): RequireUser,
    Path(id): Path<OrderId>,
) -> Result<Json<Value>> {
    let order = order_service(&state).get_for_user(claims.sub, id).await?;

    Ok(Json(json!({ "success": true, "order": order })))
}
