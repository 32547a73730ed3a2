//! Cart repository.
//!
//! The add path is a single atomic upsert so concurrent adds from the same
//! user merge instead of racing read-modify-write.

use sqlx::PgPool;

use tamarind_core::{CartEntryId, ItemId, UserId};

use super::RepositoryError;
use crate::models::{CartLine, Item};

/// Outcome of a delete-or-decrement call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveOutcome {
    /// Quantity was reduced by one.
    Decremented,
    /// The row was deleted.
    Removed,
    /// There was nothing to remove; reported as success to the client.
    AlreadyAbsent,
}

/// Repository for per-user cart state.
pub struct CartRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CartRepository<'a> {
    /// Create a new cart repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// All cart entries for a user, joined with live item data.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_cart(&self, user_id: UserId) -> Result<Vec<CartLine>, RepositoryError> {
        let rows = sqlx::query_as::<_, CartRow>(
            "SELECT c.id, c.quantity,
                    i.id AS item_id, i.name, i.description, i.price, i.category,
                    i.image_url, i.hearts
             FROM store.cart_items c
             JOIN store.items i ON i.id = c.item_id
             WHERE c.user_id = $1
             ORDER BY c.id",
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(CartRow::into_line).collect())
    }

    /// Merge a quantity delta into the cart.
    ///
    /// One statement: insert the row, or add the delta to the existing
    /// quantity, clamped to a minimum of 1. A negative delta can never
    /// delete the row through this path.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the item doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn add(
        &self,
        user_id: UserId,
        item_id: ItemId,
        delta: i32,
    ) -> Result<CartEntryId, RepositoryError> {
        let row: Option<(CartEntryId,)> = sqlx::query_as(
            "INSERT INTO store.cart_items (user_id, item_id, quantity)
             VALUES ($1, $2, GREATEST(1, $3))
             ON CONFLICT (user_id, item_id)
             DO UPDATE SET quantity = GREATEST(1, store.cart_items.quantity + $3),
                           updated_at = now()
             RETURNING id",
        )
        .bind(user_id)
        .bind(item_id)
        .bind(delta)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_foreign_key_violation()
            {
                return RepositoryError::NotFound;
            }
            RepositoryError::Database(e)
        })?;

        row.map(|(id,)| id).ok_or(RepositoryError::NotFound)
    }

    /// Set a cart entry's quantity directly, clamped to a minimum of 1.
    ///
    /// Scoped by user so one customer cannot edit another's entry.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the entry doesn't exist for
    /// this user. Returns `RepositoryError::Database` for other errors.
    pub async fn set_quantity(
        &self,
        user_id: UserId,
        entry_id: CartEntryId,
        quantity: i32,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "UPDATE store.cart_items
             SET quantity = GREATEST(1, $3), updated_at = now()
             WHERE id = $2 AND user_id = $1",
        )
        .bind(user_id)
        .bind(entry_id)
        .bind(quantity)
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// Decrement an item's quantity, deleting the row at zero. With
    /// `force`, delete unconditionally. Absent rows are a success.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn remove(
        &self,
        user_id: UserId,
        item_id: ItemId,
        force: bool,
    ) -> Result<RemoveOutcome, RepositoryError> {
        if force {
            let result =
                sqlx::query("DELETE FROM store.cart_items WHERE user_id = $1 AND item_id = $2")
                    .bind(user_id)
                    .bind(item_id)
                    .execute(self.pool)
                    .await?;

            return Ok(if result.rows_affected() > 0 {
                RemoveOutcome::Removed
            } else {
                RemoveOutcome::AlreadyAbsent
            });
        }

        // Decrement where possible, delete where the decrement would hit 0.
        let decremented = sqlx::query(
            "UPDATE store.cart_items
             SET quantity = quantity - 1, updated_at = now()
             WHERE user_id = $1 AND item_id = $2 AND quantity > 1",
        )
        .bind(user_id)
        .bind(item_id)
        .execute(self.pool)
        .await?;

        if decremented.rows_affected() > 0 {
            return Ok(RemoveOutcome::Decremented);
        }

        let deleted =
            sqlx::query("DELETE FROM store.cart_items WHERE user_id = $1 AND item_id = $2")
                .bind(user_id)
                .bind(item_id)
                .execute(self.pool)
                .await?;

        Ok(if deleted.rows_affected() > 0 {
            RemoveOutcome::Removed
        } else {
            RemoveOutcome::AlreadyAbsent
        })
    }

    /// Delete all cart entries for a user.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn clear(&self, user_id: UserId) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM store.cart_items WHERE user_id = $1")
            .bind(user_id)
            .execute(self.pool)
            .await?;

        Ok(())
    }
}

#[derive(sqlx::FromRow)]
struct CartRow {
    id: CartEntryId,
    quantity: i32,
    item_id: ItemId,
    name: String,
    description: Option<String>,
    price: tamarind_core::Price,
    category: String,
    image_url: Option<String>,
    hearts: i32,
}

impl CartRow {
    fn into_line(self) -> CartLine {
        CartLine {
            id: self.id,
            quantity: self.quantity,
            item: Item {
                id: self.item_id,
                name: self.name,
                description: self.description,
                price: self.price,
                category: self.category,
                image_url: self.image_url,
                hearts: self.hearts,
            },
        }
    }
}
