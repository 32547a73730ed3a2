//! Menu item repository, writing to the storefront catalog.

use sqlx::PgPool;

use tamarind_core::{ItemId, Price};

use super::RepositoryError;
use crate::models::Item;

const ITEM_COLUMNS: &str = "id, name, description, price, category, image_url, hearts";

/// Fields accepted when creating or updating a menu item.
pub struct ItemInput<'i> {
    pub name: &'i str,
    pub description: Option<&'i str>,
    pub price: Price,
    pub category: &'i str,
    pub image_url: Option<&'i str>,
}

/// Repository for catalog management.
pub struct ItemRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ItemRepository<'a> {
    /// Create a new item repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List the full catalog, optionally filtered to one category.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self, category: Option<&str>) -> Result<Vec<Item>, RepositoryError> {
        let items = match category {
            Some(category) => {
                sqlx::query_as::<_, Item>(&format!(
                    "SELECT {ITEM_COLUMNS} FROM store.items WHERE category = $1 ORDER BY id"
                ))
                .bind(category)
                .fetch_all(self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Item>(&format!(
                    "SELECT {ITEM_COLUMNS} FROM store.items ORDER BY id"
                ))
                .fetch_all(self.pool)
                .await?
            }
        };

        Ok(items)
    }

    /// Get a single item.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, id: ItemId) -> Result<Option<Item>, RepositoryError> {
        let item = sqlx::query_as::<_, Item>(&format!(
            "SELECT {ITEM_COLUMNS} FROM store.items WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(item)
    }

    /// Add an item to the catalog.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn create(&self, input: ItemInput<'_>) -> Result<Item, RepositoryError> {
        let item = sqlx::query_as::<_, Item>(&format!(
            "INSERT INTO store.items (name, description, price, category, image_url)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {ITEM_COLUMNS}"
        ))
        .bind(input.name)
        .bind(input.description)
        .bind(input.price)
        .bind(input.category)
        .bind(input.image_url)
        .fetch_one(self.pool)
        .await?;

        Ok(item)
    }

    /// Update an item in place.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the item doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(&self, id: ItemId, input: ItemInput<'_>) -> Result<Item, RepositoryError> {
        let item = sqlx::query_as::<_, Item>(&format!(
            "UPDATE store.items
             SET name = $2, description = $3, price = $4, category = $5, image_url = $6,
                 updated_at = now()
             WHERE id = $1
             RETURNING {ITEM_COLUMNS}"
        ))
        .bind(id)
        .bind(input.name)
        .bind(input.description)
        .bind(input.price)
        .bind(input.category)
        .bind(input.image_url)
        .fetch_optional(self.pool)
        .await?;

        item.ok_or(RepositoryError::NotFound)
    }

    /// Remove an item from the catalog.
    ///
    /// Existing orders keep their JSONB line snapshots; only the live
    /// catalog row goes away.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the item doesn't exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn delete(&self, id: ItemId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM store.items WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
