//! Menu item repository.

use sqlx::PgPool;

use tamarind_core::ItemId;

use super::RepositoryError;
use crate::models::Item;

const ITEM_COLUMNS: &str = "id, name, description, price, category, image_url, hearts";

/// Repository for catalog reads. Menu writes go through the admin server.
pub struct ItemRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ItemRepository<'a> {
    /// Create a new item repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List the catalog, optionally filtered to one category.
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
}
