//! HTTP route handlers for the admin API.
//!
//! # Route Structure
//!
//! ```text
//! # Accounts
//! POST /api/admin/login                 - Login, returns an 8-hour token
//! GET  /api/admin/validate              - Validate the presented token
//! POST /api/admin/create                - Create an admin (manageUsers)
//! GET  /api/admin/admins                - List admins (super_admin only)
//! PUT  /api/admin/change-password       - Change own password
//!
//! # Orders (manageOrders)
//! GET /api/admin/orders                 - All orders, newest first
//! GET /api/admin/orders/{id}            - One order
//! PUT /api/admin/orders/{id}/status     - Advance or cancel
//!
//! # Menu (manageProducts)
//! GET    /api/menu                      - List items (?category=)
//! POST   /api/menu                      - Add item
//! PUT    /api/menu/{id}                 - Update item
//! DELETE /api/menu/{id}                 - Delete item
//!
//! # Settings (manageSettings)
//! GET   /api/admin/settings             - Full settings
//! PUT   /api/admin/settings             - Replace all fields
//! PATCH /api/admin/settings/section     - Update one section
//! ```

pub mod auth;
pub mod menu;
pub mod orders;
pub mod settings;

use axum::{
    Router,
    routing::{get, patch, post, put},
};

use crate::middleware::login_rate_limiter;
use crate::state::AppState;

/// Create the account routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(auth::login).layer(login_rate_limiter()))
        .route("/validate", get(auth::validate))
        .route("/create", post(auth::create))
        .route("/admins", get(auth::list))
        .route("/change-password", put(auth::change_password))
}

/// Create the order management routes router.
pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(orders::list))
        .route("/{id}", get(orders::get))
        .route("/{id}/status", put(orders::update_status))
}

/// Create the menu management routes router.
pub fn menu_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(menu::list).post(menu::create))
        .route("/{id}", put(menu::update).delete(menu::remove))
}

/// Create the settings routes router.
pub fn settings_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(settings::get).put(settings::update))
        .route("/section", patch(settings::update_section))
}

/// Create all API routes for the admin server.
pub fn routes() -> Router<AppState> {
    let admin = auth_routes()
        .nest("/orders", order_routes())
        .nest("/settings", settings_routes());

    Router::new()
        .nest("/api/admin", admin)
        .nest("/api/menu", menu_routes())
}
