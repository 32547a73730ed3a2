//! Cart routes under `/api/cart`. All require a customer token.
//!
//! Every mutation responds with the full post-operation cart so clients
//! never have to reconcile partial state.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use serde_json::{Value, json};

use tamarind_core::{CartEntryId, ItemId};

use crate::db::CartRepository;
use crate::error::Result;
use crate::middleware::RequireUser;
use crate::state::AppState;

async fn cart_response(repo: &CartRepository<'_>, user_id: tamarind_core::UserId) -> Result<Json<Value>> {
    let cart = repo.get_cart(user_id).await?;
    Ok(Json(json!({ "success": true, "cart": cart })))
}

/// GET /api/cart
///
/// # Errors
///
/// Returns 401 without a valid token.
pub async fn get(
    State(state): State<AppState>,
    RequireUser(claims): RequireUser,
) -> Result<Json<Value>> {
    let repo = CartRepository::new(state.pool());
    cart_response(&repo, claims.sub).await
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddRequest {
    pub item_id: ItemId,
    #[serde(default = "default_quantity")]
    pub quantity: i32,
}

const fn default_quantity() -> i32 {
    1
}

/// POST /api/cart
///
/// Merges the quantity into any existing entry atomically, so two
/// concurrent adds both count.
///
/// # Errors
///
/// Returns 404 for an unknown item.
pub async fn add(
    State(state): State<AppState>,
    RequireUser(claims): RequireUser,
    Json(body): Json<AddRequest>,
) -> Result<Json<Value>> {
    let repo = CartRepository::new(state.pool());
    repo.add(claims.sub, body.item_id, body.quantity).await?;
    cart_response(&repo, claims.sub).await
}

#[derive(Debug, Deserialize)]
pub struct UpdateRequest {
    pub quantity: i32,
}

/// PUT /api/cart/{entryId}
///
/// # Errors
///
/// Returns 404 if the entry doesn't exist for this user.
pub async fn update(
    State(state): State<AppState>,
    RequireUser(claims): RequireUser,
    Path(entry_id): Path<CartEntryId>,
    Json(body): Json<UpdateRequest>,
) -> Result<Json<Value>> {
    let repo = CartRepository::new(state.pool());
    repo.set_quantity(claims.sub, entry_id, body.quantity).await?;
    cart_response(&repo, claims.sub).await
}

#[derive(Debug, Deserialize)]
pub struct RemoveQuery {
    #[serde(default)]
    pub force: bool,
}

/// DELETE /api/cart/{itemId}
///
/// Decrements by one, deleting the entry at zero. `?force=true` deletes
/// outright. Removing an absent item succeeds, so retried deletes are
/// harmless.
///
/// # Errors
///
/// Returns 401 without a valid token.
pub async fn remove(
    State(state): State<AppState>,
    RequireUser(claims): RequireUser,
    Path(item_id): Path<ItemId>,
    Query(query): Query<RemoveQuery>,
) -> Result<Json<Value>> {
    let repo = CartRepository::new(state.pool());
    repo.remove(claims.sub, item_id, query.force).await?;
    cart_response(&repo, claims.sub).await
}

/// DELETE /api/cart
///
/// # Errors
///
/// Returns 401 without a valid token.
pub async fn clear(
    State(state): State<AppState>,
    RequireUser(claims): RequireUser,
) -> Result<Json<Value>> {
    let repo = CartRepository::new(state.pool());
    repo.clear(claims.sub).await?;
    cart_response(&repo, claims.sub).await
}
