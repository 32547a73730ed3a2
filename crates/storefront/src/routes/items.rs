//! Public catalog routes under `/api/items`.
//!
//! Listings are read-heavy and change rarely, so they are served through
//! the moka cache in [`AppState`], keyed by category filter. Admin-side
//! edits become visible when the cache entry expires.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use serde_json::{Value, json};

use tamarind_core::ItemId;

use crate::db::ItemRepository;
use crate::error::{AppError, Result};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub category: Option<String>,
}

/// GET /api/items
///
/// # Errors
///
/// Returns 500 if the catalog cannot be read.
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Value>> {
    let cache_key = query.category.clone().unwrap_or_default();

    if let Some(items) = state.menu_cache().get(&cache_key).await {
        return Ok(Json(json!({ "success": true, "items": &*items })));
    }

    let items = ItemRepository::new(state.pool())
        .list(query.category.as_deref())
        .await?;
    let items = Arc::new(items);

    state.menu_cache().insert(cache_key, items.clone()).await;

    Ok(Json(json!({ "success": true, "items": &*items })))
}

/// GET /api/items/{id}
///
/// # Errors
///
/// Returns 404 for an unknown item.
pub async fn get(State(state): State<AppState>, Path(id): Path<ItemId>) -> Result<Json<Value>> {
    let item = ItemRepository::new(state.pool())
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Item".to_owned()))?;

    Ok(Json(json!({ "success": true, "item": item })))
}
