//! Order repository.
//!
//! Cash orders are finalized in one transaction (order insert, cart clear,
//! reward increment). Online orders are inserted pending and finalized by
//! [`OrderRepository::confirm_by_session`], whose guard on
//! `rewards_processed` makes replayed confirmations idempotent.

use sqlx::{PgPool, Postgres, Transaction, types::Json};

use tamarind_core::{OrderId, OrderStatus, PaymentMethod, PaymentStatus, Price, UserId};

use super::RepositoryError;
use crate::models::{DeliveryDetails, Order, OrderLine};

const ORDER_COLUMNS: &str = "id, user_id, first_name, last_name, email, phone_number, address, \
     city, state, zip_code, country, is_custom_address, address_label, payment_method, \
     payment_status, status, subtotal, tax, shipping, total, items, payment_intent_id, \
     session_id, rewards_processed, created_at, updated_at";

/// Everything needed to persist a new order.
pub struct NewOrder<'o> {
    pub user_id: UserId,
    pub delivery: &'o DeliveryDetails,
    pub payment_method: PaymentMethod,
    pub payment_status: PaymentStatus,
    pub status: OrderStatus,
    pub subtotal: Price,
    pub tax: Price,
    pub shipping: Price,
    pub total: Price,
    pub items: &'o [OrderLine],
    pub payment_intent_id: Option<&'o str>,
    pub session_id: Option<&'o str>,
    pub rewards_processed: bool,
}

/// Result of a session confirmation.
pub struct Confirmation {
    pub order: Order,
    /// False when the session had already been confirmed earlier.
    pub newly_confirmed: bool,
}

/// Repository for customer orders.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Persist a pending online order. The cart is left untouched until
    /// payment is confirmed.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create_pending(&self, order: NewOrder<'_>) -> Result<Order, RepositoryError> {
        let mut tx = self.pool.begin().await?;
        let created = insert_order(&mut tx, order).await?;
        tx.commit().await?;
        Ok(created)
    }

    /// Persist a cash-on-delivery order, clear the cart, and grant the
    /// reward point, all in one transaction.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if any statement fails.
    pub async fn create_cod(&self, order: NewOrder<'_>) -> Result<Order, RepositoryError> {
        let user_id = order.user_id;
        let mut tx = self.pool.begin().await?;

        let created = insert_order(&mut tx, order).await?;
        clear_cart(&mut tx, user_id).await?;
        grant_reward_point(&mut tx, user_id).await?;

        tx.commit().await?;
        Ok(created)
    }

    /// Finalize the order attached to a paid checkout session.
    ///
    /// The `rewards_processed` guard means only the first call mutates
    /// anything; replays return the already-confirmed order unchanged.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no order references the
    /// session. Returns `RepositoryError::Database` for other errors.
    pub async fn confirm_by_session(
        &self,
        session_id: &str,
    ) -> Result<Confirmation, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let confirmed = sqlx::query_as::<_, Order>(&format!(
            "UPDATE store.orders
             SET payment_status = 'succeeded', status = 'confirmed',
                 rewards_processed = TRUE, updated_at = now()
             WHERE session_id = $1 AND rewards_processed = FALSE
             RETURNING {ORDER_COLUMNS}"
        ))
        .bind(session_id)
        .fetch_optional(&mut *tx)
        .await?;

        if let Some(order) = confirmed {
            clear_cart(&mut tx, order.user_id).await?;
            grant_reward_point(&mut tx, order.user_id).await?;
            tx.commit().await?;
            return Ok(Confirmation {
                order,
                newly_confirmed: true,
            });
        }

        tx.commit().await?;

        // Already processed, or unknown session.
        let order = self
            .get_by_session(session_id)
            .await?
            .ok_or(RepositoryError::NotFound)?;

        Ok(Confirmation {
            order,
            newly_confirmed: false,
        })
    }

    /// A user's orders, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Order>, RepositoryError> {
        let orders = sqlx::query_as::<_, Order>(&format!(
            "SELECT {ORDER_COLUMNS} FROM store.orders
             WHERE user_id = $1
             ORDER BY created_at DESC"
        ))
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok(orders)
    }

    /// Get one order by id, regardless of owner. Ownership is the
    /// caller's concern.
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

    /// Get the order referencing a checkout session.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_session(
        &self,
        session_id: &str,
    ) -> Result<Option<Order>, RepositoryError> {
        let order = sqlx::query_as::<_, Order>(&format!(
            "SELECT {ORDER_COLUMNS} FROM store.orders WHERE session_id = $1"
        ))
        .bind(session_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(order)
    }
}

async fn insert_order(
    tx: &mut Transaction<'_, Postgres>,
    order: NewOrder<'_>,
) -> Result<Order, RepositoryError> {
    let d = order.delivery;
    let created = sqlx::query_as::<_, Order>(&format!(
        "INSERT INTO store.orders
             (user_id, first_name, last_name, email, phone_number, address, city, state,
              zip_code, country, is_custom_address, address_label, payment_method,
              payment_status, status, subtotal, tax, shipping, total, items,
              payment_intent_id, session_id, rewards_processed)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16,
                 $17, $18, $19, $20, $21, $22, $23)
         RETURNING {ORDER_COLUMNS}"
    ))
    .bind(order.user_id)
    .bind(&d.first_name)
    .bind(&d.last_name)
    .bind(&d.email)
    .bind(&d.phone_number)
    .bind(&d.address)
    .bind(&d.city)
    .bind(&d.state)
    .bind(&d.zip_code)
    .bind(&d.country)
    .bind(d.is_custom_address)
    .bind(&d.address_label)
    .bind(order.payment_method)
    .bind(order.payment_status)
    .bind(order.status)
    .bind(order.subtotal)
    .bind(order.tax)
    .bind(order.shipping)
    .bind(order.total)
    .bind(Json(order.items))
    .bind(order.payment_intent_id)
    .bind(order.session_id)
    .bind(order.rewards_processed)
    .fetch_one(&mut **tx)
    .await?;

    Ok(created)
}

async fn clear_cart(
    tx: &mut Transaction<'_, Postgres>,
    user_id: UserId,
) -> Result<(), RepositoryError> {
    sqlx::query("DELETE FROM store.cart_items WHERE user_id = $1")
        .bind(user_id)
        .execute(&mut **tx)
        .await?;
    Ok(())
}

async fn grant_reward_point(
    tx: &mut Transaction<'_, Postgres>,
    user_id: UserId,
) -> Result<(), RepositoryError> {
    sqlx::query(
        "UPDATE store.users SET reward_progress = reward_progress + 1, updated_at = now()
         WHERE id = $1",
    )
    .bind(user_id)
    .execute(&mut **tx)
    .await?;
    Ok(())
}
