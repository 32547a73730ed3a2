//! Application state shared across handlers.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use sqlx::PgPool;

use crate::config::StorefrontConfig;
use crate::models::Item;
use crate::services::stripe::StripeClient;

/// How long catalog reads may be served from cache.
const MENU_CACHE_TTL: Duration = Duration::from_secs(60);

/// Cached menu listings keyed by category filter (empty string = all items).
pub type MenuCache = Cache<String, Arc<Vec<Item>>>;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like database connections and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    pool: PgPool,
    stripe: StripeClient,
    menu_cache: MenuCache,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Errors
    ///
    /// Returns an error if the Stripe HTTP client fails to build.
    pub fn new(
        config: StorefrontConfig,
        pool: PgPool,
    ) -> Result<Self, crate::services::stripe::StripeError> {
        let stripe = StripeClient::new(&config.stripe)?;
        let menu_cache = Cache::builder()
            .max_capacity(64)
            .time_to_live(MENU_CACHE_TTL)
            .build();

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                stripe,
                menu_cache,
            }),
        })
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Get a reference to the Stripe API client.
    #[must_use]
    pub fn stripe(&self) -> &StripeClient {
        &self.inner.stripe
    }

    /// Get a reference to the menu listing cache.
    #[must_use]
    pub fn menu_cache(&self) -> &MenuCache {
        &self.inner.menu_cache
    }

    /// Drop all cached menu listings.
    pub fn invalidate_menu_cache(&self) {
        self.inner.menu_cache.invalidate_all();
    }
}
