//! Database operations for the storefront `PostgreSQL` schema.
//!
//! # Schema: `store`
//!
//! - `users` - Customer accounts (argon2 password hashes, reward progress)
//! - `items` - The menu catalog
//! - `cart_items` - Per-user per-item quantities
//! - `user_favorites` - Favorite set, paired with `items.hearts`
//! - `orders` - Orders with JSONB line snapshots
//! - `user_settings` - Lazily upserted per-user preferences
//! - `restaurant_settings` - Fetch-or-create singleton
//!
//! # Migrations
//!
//! Migrations are stored in `crates/storefront/migrations/` and run via:
//! ```bash
//! cargo run -p tamarind-cli -- migrate storefront
//! ```

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub mod cart;
pub mod favorites;
pub mod items;
pub mod orders;
pub mod settings;
pub mod users;

pub use cart::CartRepository;
pub use favorites::FavoritesRepository;
pub use items::ItemRepository;
pub use orders::OrderRepository;
pub use settings::SettingsRepository;
pub use users::UserRepository;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., unique email).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
