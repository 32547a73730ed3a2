//! Favorites routes under `/api/favorites`. All require a customer token.
//!
//! Mutations respond with the authoritative post-operation list, so a
//! client that raced another device converges on the server's view.

use axum::{
    Json,
    extract::{Path, State},
};
use serde_json::{Value, json};

use tamarind_core::{ItemId, UserId};

use crate::db::FavoritesRepository;
use crate::error::Result;
use crate::middleware::RequireUser;
use crate::state::AppState;

async fn favorites_response(
    repo: &FavoritesRepository<'_>,
    user_id: UserId,
) -> Result<Json<Value>> {
    let favorites = repo.list(user_id).await?;
    Ok(Json(json!({ "success": true, "favorites": favorites })))
}

/// GET /api/favorites
///
/// # Errors
///
/// Returns 401 without a valid token.
pub async fn list(
    State(state): State<AppState>,
    RequireUser(claims): RequireUser,
) -> Result<Json<Value>> {
    let repo = FavoritesRepository::new(state.pool());
    favorites_response(&repo, claims.sub).await
}

/// POST /api/favorites/{itemId}
///
/// Adding an item twice is a no-op; the heart counter only moves when
/// membership actually changed.
///
/// # Errors
///
/// Returns 404 for an unknown item.
pub async fn add(
    State(state): State<AppState>,
    RequireUser(claims): RequireUser,
    Path(item_id): Path<ItemId>,
) -> Result<Json<Value>> {
    let repo = FavoritesRepository::new(state.pool());
    repo.add(claims.sub, item_id).await?;
    // Heart counts live on the cached menu items
    state.invalidate_menu_cache();
    favorites_response(&repo, claims.sub).await
}

/// DELETE /api/favorites/{itemId}
///
/// # Errors
///
/// Returns 401 without a valid token.
pub async fn remove(
    State(state): State<AppState>,
    RequireUser(claims): RequireUser,
    Path(item_id): Path<ItemId>,
) -> Result<Json<Value>> {
    let repo = FavoritesRepository::new(state.pool());
    repo.remove(claims.sub, item_id).await?;
    state.invalidate_menu_cache();
    favorites_response(&repo, claims.sub).await
}
