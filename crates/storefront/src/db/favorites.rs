//! Favorites repository.
//!
//! Membership and the item's heart counter move together inside one
//! transaction, and the counter only moves when membership actually
//! changed, so repeated toggles round-trip exactly.

use sqlx::PgPool;

use tamarind_core::{ItemId, UserId};

use super::RepositoryError;
use crate::models::Item;

const ITEM_COLUMNS: &str = "id, name, description, price, category, image_url, hearts";

/// Repository for per-user favorites.
pub struct FavoritesRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> FavoritesRepository<'a> {
    /// Create a new favorites repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Add an item to the user's favorites.
    ///
    /// Adding an item already present is a no-op; the heart counter is
    /// only incremented when a row was actually inserted.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the item doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn add(&self, user_id: UserId, item_id: ItemId) -> Result<(), RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let inserted = sqlx::query(
            "INSERT INTO store.user_favorites (user_id, item_id)
             VALUES ($1, $2)
             ON CONFLICT (user_id, item_id) DO NOTHING",
        )
        .bind(user_id)
        .bind(item_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_foreign_key_violation()
            {
                return RepositoryError::NotFound;
            }
            RepositoryError::Database(e)
        })?;

        if inserted.rows_affected() > 0 {
            sqlx::query("UPDATE store.items SET hearts = hearts + 1 WHERE id = $1")
                .bind(item_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        Ok(())
    }

    /// Remove an item from the user's favorites.
    ///
    /// Removing an absent item is a no-op. The heart counter is only
    /// decremented when a row was actually deleted, and never below zero.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn remove(&self, user_id: UserId, item_id: ItemId) -> Result<(), RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let deleted =
            sqlx::query("DELETE FROM store.user_favorites WHERE user_id = $1 AND item_id = $2")
                .bind(user_id)
                .bind(item_id)
                .execute(&mut *tx)
                .await?;

        if deleted.rows_affected() > 0 {
            sqlx::query("UPDATE store.items SET hearts = GREATEST(0, hearts - 1) WHERE id = $1")
                .bind(item_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        Ok(())
    }

    /// The user's favorites, joined with live item data.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self, user_id: UserId) -> Result<Vec<Item>, RepositoryError> {
        let items = sqlx::query_as::<_, Item>(&format!(
            "SELECT {ITEM_COLUMNS} FROM store.items
             WHERE id IN (SELECT item_id FROM store.user_favorites WHERE user_id = $1)
             ORDER BY id"
        ))
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok(items)
    }
}
