//! Order repository for fulfillment management.
//!
//! The status update is an optimistic compare-and-set on the previously
//! read status, so two concurrent panel sessions cannot race an order
//! past a legal step.

use sqlx::PgPool;

use tamarind_core::{OrderId, OrderStatus};

use super::RepositoryError;
use crate::models::Order;

const ORDER_COLUMNS: &str = "id, user_id, first_name, last_name, email, phone_number, address, \
     city, state, zip_code, country, is_custom_address, address_label, payment_method, \
     payment_status, status, subtotal, tax, shipping, total, items, payment_intent_id, \
     session_id, rewards_processed, created_at, updated_at";

/// Repository for order reads and status transitions.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// All orders across all customers, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_all(&self) -> Result<Vec<Order>, RepositoryError> {
        let orders = sqlx::query_as::<_, Order>(&format!(
            "SELECT {ORDER_COLUMNS} FROM store.orders ORDER BY created_at DESC"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(orders)
    }

    /// Get one order by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: OrderId) -> Result<Option<Order>, RepositoryError> {
        let order = sqlx::query_as::<_, Order>(&format!(
            "SELECT {ORDER_COLUMNS} FROM store.orders WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(order)
    }

    /// Move an order from `from` to `next`.
    ///
    /// The caller validates the transition against the order it read; the
    /// compare-and-set on `from` makes a stale update (the order moved on
    /// since that read) affect zero rows and surface as a conflict.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the order is no longer in
    /// `from`. Returns `RepositoryError::Database` for other errors.
    pub async fn update_status(
        &self,
        id: OrderId,
        from: OrderStatus,
        next: OrderStatus,
    ) -> Result<Order, RepositoryError> {
        let updated = sqlx::query_as::<_, Order>(&format!(
            "UPDATE store.orders SET status = $3, updated_at = now()
             WHERE id = $1 AND status = $2
             RETURNING {ORDER_COLUMNS}"
        ))
        .bind(id)
        .bind(from)
        .bind(next)
        .fetch_optional(self.pool)
        .await?;

        updated.ok_or_else(|| {
            RepositoryError::Conflict("order status changed, reload and retry".to_owned())
        })
    }
}
