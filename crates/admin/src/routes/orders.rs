//! Order management routes under `/api/admin/orders`.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Deserialize;
use serde_json::{Value, json};

use tamarind_core::{OrderId, OrderStatus};

use crate::db::OrderRepository;
use crate::error::{AppError, Result};
use crate::middleware::{Capability, RequireAdmin, ensure_permission};
use crate::state::AppState;

/// GET /api/admin/orders
///
/// Every order across all customers, newest first.
///
/// # Errors
///
/// Returns 403 without the order management permission.
pub async fn list(
    State(state): State<AppState>,
    RequireAdmin(claims): RequireAdmin,
) -> Result<Json<Value>> {
    ensure_permission(&claims, Capability::ManageOrders)?;

    let orders = OrderRepository::new(state.pool()).list_all().await?;

    Ok(Json(json!({
        "success": true,
        "orders": orders,
    })))
}

/// GET /api/admin/orders/{id}
///
/// # Errors
///
/// Returns 403 without the order management permission, 404 for an
/// unknown order.
pub async fn get(
    State(state): State<AppState>,
    RequireAdmin(claims): RequireAdmin,
    Path(id): Path<OrderId>,
) -> Result<Json<Value>> {
    ensure_permission(&claims, Capability::ManageOrders)?;

    let order = OrderRepository::new(state.pool())
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Order".to_owned()))?;

    Ok(Json(json!({
        "success": true,
        "order": order,
    })))
}

#[derive(Debug, Deserialize)]
pub struct StatusRequest {
    pub status: OrderStatus,
}

/// PUT /api/admin/orders/{id}/status
///
/// Moves an order forward through fulfillment (or cancels it). Backward
/// moves, repeats, and changes to delivered or cancelled orders are
/// rejected.
///
/// # Errors
///
/// Returns 403 without the order management permission, 404 for an
/// unknown order, 400 for an illegal transition, 409 when the order
/// changed under the caller.
pub async fn update_status(
    State(state): State<AppState>,
    RequireAdmin(claims): RequireAdmin,
    Path(id): Path<OrderId>,
    Json(body): Json<StatusRequest>,
) -> Result<Json<Value>> {
    ensure_permission(&claims, Capability::ManageOrders)?;

    let orders = OrderRepository::new(state.pool());
    let order = orders
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Order".to_owned()))?;

    if !order.status.can_transition_to(body.status) {
        return Err(AppError::BadRequest(format!(
            "Cannot change order status from {} to {}",
            order.status, body.status
        )));
    }

    let updated = orders.update_status(id, order.status, body.status).await?;

    tracing::info!(
        order_id = %id,
        from = %order.status,
        to = %body.status,
        admin_id = %claims.sub,
        "order status updated"
    );

    Ok(Json(json!({
        "success": true,
        "order": updated,
    })))
}
