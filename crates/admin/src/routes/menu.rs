//! Catalog management routes under `/api/menu`.
//!
//! Writes land directly in the storefront's `store.items` table; the
//! storefront picks them up when its short-lived menu cache expires.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use serde_json::{Value, json};

use tamarind_core::{ItemId, Price};

use crate::db::ItemRepository;
use crate::db::items::ItemInput;
use crate::error::{AppError, Result};
use crate::middleware::{Capability, RequireAdmin, ensure_permission};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub category: Option<String>,
}

/// GET /api/menu
///
/// # Errors
///
/// Returns 403 without the menu management permission.
pub async fn list(
    State(state): State<AppState>,
    RequireAdmin(claims): RequireAdmin,
    Query(query): Query<ListQuery>,
) -> Result<Json<Value>> {
    ensure_permission(&claims, Capability::ManageProducts)?;

    let items = ItemRepository::new(state.pool())
        .list(query.category.as_deref())
        .await?;

    Ok(Json(json!({
        "success": true,
        "items": items,
    })))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemRequest {
    pub name: String,
    pub description: Option<String>,
    /// Price in minor currency units.
    pub price: Price,
    pub category: String,
    pub image_url: Option<String>,
}

impl ItemRequest {
    fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(AppError::BadRequest("Name is required".to_owned()));
        }
        if self.category.trim().is_empty() {
            return Err(AppError::BadRequest("Category is required".to_owned()));
        }
        if self.price.is_negative() {
            return Err(AppError::BadRequest("Price cannot be negative".to_owned()));
        }
        Ok(())
    }

    fn as_input(&self) -> ItemInput<'_> {
        ItemInput {
            name: self.name.trim(),
            description: self.description.as_deref(),
            price: self.price,
            category: self.category.trim(),
            image_url: self.image_url.as_deref(),
        }
    }
}

/// POST /api/menu
///
/// # Errors
///
/// Returns 403 without the menu management permission, 400 for invalid
/// fields.
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(claims): RequireAdmin,
    Json(body): Json<ItemRequest>,
) -> Result<Json<Value>> {
    ensure_permission(&claims, Capability::ManageProducts)?;
    body.validate()?;

    let item = ItemRepository::new(state.pool())
        .create(body.as_input())
        .await?;

    tracing::info!(item_id = %item.id, admin_id = %claims.sub, "menu item created");

    Ok(Json(json!({
        "success": true,
        "item": item,
    })))
}

/// PUT /api/menu/{id}
///
/// # Errors
///
/// Returns 403 without the menu management permission, 404 for an unknown
/// item, 400 for invalid fields.
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(claims): RequireAdmin,
    Path(id): Path<ItemId>,
    Json(body): Json<ItemRequest>,
) -> Result<Json<Value>> {
    ensure_permission(&claims, Capability::ManageProducts)?;
    body.validate()?;

    let item = ItemRepository::new(state.pool())
        .update(id, body.as_input())
        .await
        .map_err(|e| match e {
            crate::db::RepositoryError::NotFound => AppError::NotFound("Item".to_owned()),
            other => AppError::Database(other),
        })?;

    Ok(Json(json!({
        "success": true,
        "item": item,
    })))
}

/// DELETE /api/menu/{id}
///
/// # Errors
///
/// Returns 403 without the menu management permission, 404 for an unknown
/// item.
pub async fn remove(
    State(state): State<AppState>,
    RequireAdmin(claims): RequireAdmin,
    Path(id): Path<ItemId>,
) -> Result<Json<Value>> {
    ensure_permission(&claims, Capability::ManageProducts)?;

    ItemRepository::new(state.pool())
        .delete(id)
        .await
        .map_err(|e| match e {
            crate::db::RepositoryError::NotFound => AppError::NotFound("Item".to_owned()),
            other => AppError::Database(other),
        })?;

    tracing::info!(item_id = %id, admin_id = %claims.sub, "menu item deleted");

    Ok(Json(json!({
        "success": true,
        "message": "Item deleted",
    })))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(name: &str, category: &str, price: i64) -> ItemRequest {
        ItemRequest {
            name: name.to_string(),
            description: None,
            price: Price::from_minor(price),
            category: category.to_string(),
            image_url: None,
        }
    }

    #[test]
    fn test_blank_name_rejected() {
        assert!(request("  ", "Pastries", 600).validate().is_err());
    }

    #[test]
    fn test_negative_price_rejected() {
        assert!(request("Meat Pie", "Pastries", -1).validate().is_err());
    }

    #[test]
    fn test_valid_request_passes_and_trims() {
        let req = request("  Meat Pie ", "Pastries", 600);
        assert!(req.validate().is_ok());
        assert_eq!(req.as_input().name, "Meat Pie");
    }
}
