//! HTTP route handlers for the storefront API.
//!
//! # Route Structure
//!
//! ```text
//! # Account
//! POST /api/user/register                  - Create an account
//! POST /api/user/login                     - Login, returns a 30-day token
//! GET  /api/user/validate                  - Validate the presented token
//! GET  /api/user/rewards                   - Loyalty tier and progress
//! POST /api/user/forgot-password           - Start password reset
//! GET  /api/user/verify-reset-token/{t}    - Check a reset token
//! POST /api/user/reset-password            - Finish password reset
//!
//! # Catalog
//! GET  /api/items                          - List items (?category=)
//! GET  /api/items/{id}                     - One item
//!
//! # Cart (auth required)
//! GET    /api/cart                         - Current cart
//! POST   /api/cart                         - Merge {itemId, quantity}
//! PUT    /api/cart/{entryId}               - Set quantity
//! DELETE /api/cart/{itemId}                - Decrement (?force=true deletes)
//! DELETE /api/cart                         - Clear
//!
//! # Orders (auth required)
//! POST /api/orders                         - Place order (cod | online)
//! GET  /api/orders/confirm?session_id=     - Confirm online payment
//! GET  /api/orders                         - Order history
//! GET  /api/orders/{id}                    - One order (owner only)
//!
//! # Favorites (auth required)
//! GET    /api/favorites                    - List
//! POST   /api/favorites/{itemId}           - Add
//! DELETE /api/favorites/{itemId}           - Remove
//!
//! # Settings (auth required)
//! GET /api/settings                        - Profile + preferences + rewards
//! PUT /api/settings/{profile,password,notifications,payment,theme}
//! GET /api/settings/rewards
//! ```

pub mod cart;
pub mod favorites;
pub mod items;
pub mod orders;
pub mod settings;
pub mod user;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::middleware::{api_rate_limiter, auth_rate_limiter};
use crate::state::AppState;

/// Create the account routes router.
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(user::register))
        .route("/login", post(user::login))
        .route("/validate", get(user::validate))
        .route("/rewards", get(user::rewards))
        .route("/forgot-password", post(user::forgot_password))
        .route("/verify-reset-token/{token}", get(user::verify_reset_token))
        .route("/reset-password", post(user::reset_password))
}

/// Create the catalog routes router.
pub fn item_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(items::list))
        .route("/{id}", get(items::get))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::get).post(cart::add).delete(cart::clear))
        // PUT keys on the cart entry id, DELETE on the item id
        .route("/{id}", put(cart::update).delete(cart::remove))
}

/// Create the order routes router.
pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(orders::place).get(orders::list))
        .route("/confirm", get(orders::confirm))
        .route("/{id}", get(orders::get))
}

/// Create the favorites routes router.
pub fn favorite_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(favorites::list))
        .route("/{item_id}", post(favorites::add).delete(favorites::remove))
}

/// Create the settings routes router.
pub fn settings_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(settings::get))
        .route("/profile", put(settings::update_profile))
        .route("/password", put(settings::change_password))
        .route("/notifications", put(settings::update_notifications))
        .route("/payment", put(settings::update_payment))
        .route("/theme", put(settings::update_theme))
        .route("/rewards", get(settings::rewards))
}

/// Create all API routes for the storefront.
///
/// Auth endpoints carry the strict rate limiter; everything else shares
/// the relaxed one.
pub fn routes() -> Router<AppState> {
    let general = Router::new()
        .nest("/api/items", item_routes())
        .nest("/api/cart", cart_routes())
        .nest("/api/orders", order_routes())
        .nest("/api/favorites", favorite_routes())
        .nest("/api/settings", settings_routes())
        .layer(api_rate_limiter());

    Router::new()
        .nest("/api/user", user_routes().layer(auth_rate_limiter()))
        .merge(general)
}
