//! Menu item domain type, managed in the storefront schema.

use serde::Serialize;
use sqlx::FromRow;

use tamarind_core::{ItemId, Price};

/// A menu item in the catalog.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub description: Option<String>,
    /// Unit price in minor currency units.
    pub price: Price,
    pub category: String,
    pub image_url: Option<String>,
    /// Favorite count across all customers.
    pub hearts: i32,
}
