//! Settings repositories: per-user preferences and the restaurant singleton.

use sqlx::{PgPool, types::Json};

use tamarind_core::UserId;

use super::RepositoryError;
use crate::models::{
    AddressSettings, NotificationPrefs, PaymentPrefs, RestaurantSettings, UserSettings,
};

const USER_SETTINGS_COLUMNS: &str =
    "user_id, phone, address, notifications, payment, theme, current_tier, updated_at";

const RESTAURANT_COLUMNS: &str = "restaurant_name, contact_email, phone_number, address, \
     opening_time, closing_time, is_open, delivery_fee, minimum_order, delivery_radius, \
     estimated_delivery_time, email_notifications, sms_notifications, low_stock_alerts, \
     new_order_alerts, currency, timezone, updated_at";

/// Repository for user and restaurant settings.
pub struct SettingsRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> SettingsRepository<'a> {
    /// Create a new settings repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Fetch a user's settings, creating the default row on first access.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn get_or_create(&self, user_id: UserId) -> Result<UserSettings, RepositoryError> {
        sqlx::query(
            "INSERT INTO store.user_settings (user_id) VALUES ($1)
             ON CONFLICT (user_id) DO NOTHING",
        )
        .bind(user_id)
        .execute(self.pool)
        .await?;

        let settings = sqlx::query_as::<_, UserSettings>(&format!(
            "SELECT {USER_SETTINGS_COLUMNS} FROM store.user_settings WHERE user_id = $1"
        ))
        .bind(user_id)
        .fetch_one(self.pool)
        .await?;

        Ok(settings)
    }

    /// Fetch a user's settings without creating them.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(&self, user_id: UserId) -> Result<Option<UserSettings>, RepositoryError> {
        let settings = sqlx::query_as::<_, UserSettings>(&format!(
            "SELECT {USER_SETTINGS_COLUMNS} FROM store.user_settings WHERE user_id = $1"
        ))
        .bind(user_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(settings)
    }

    /// Update the profile slice of the settings row (phone + address).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn update_profile(
        &self,
        user_id: UserId,
        phone: &str,
        address: &AddressSettings,
    ) -> Result<UserSettings, RepositoryError> {
        let settings = sqlx::query_as::<_, UserSettings>(&format!(
            "INSERT INTO store.user_settings (user_id, phone, address)
             VALUES ($1, $2, $3)
             ON CONFLICT (user_id)
             DO UPDATE SET phone = $2, address = $3, updated_at = now()
             RETURNING {USER_SETTINGS_COLUMNS}"
        ))
        .bind(user_id)
        .bind(phone)
        .bind(Json(address))
        .fetch_one(self.pool)
        .await?;

        Ok(settings)
    }

    /// Replace the notification opt-ins.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn update_notifications(
        &self,
        user_id: UserId,
        prefs: NotificationPrefs,
    ) -> Result<UserSettings, RepositoryError> {
        let settings = sqlx::query_as::<_, UserSettings>(&format!(
            "INSERT INTO store.user_settings (user_id, notifications)
             VALUES ($1, $2)
             ON CONFLICT (user_id)
             DO UPDATE SET notifications = $2, updated_at = now()
             RETURNING {USER_SETTINGS_COLUMNS}"
        ))
        .bind(user_id)
        .bind(Json(prefs))
        .fetch_one(self.pool)
        .await?;

        Ok(settings)
    }

    /// Replace the payment preferences.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn update_payment(
        &self,
        user_id: UserId,
        prefs: &PaymentPrefs,
    ) -> Result<UserSettings, RepositoryError> {
        let settings = sqlx::query_as::<_, UserSettings>(&format!(
            "INSERT INTO store.user_settings (user_id, payment)
             VALUES ($1, $2)
             ON CONFLICT (user_id)
             DO UPDATE SET payment = $2, updated_at = now()
             RETURNING {USER_SETTINGS_COLUMNS}"
        ))
        .bind(user_id)
        .bind(Json(prefs))
        .fetch_one(self.pool)
        .await?;

        Ok(settings)
    }

    /// Set the UI theme.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn update_theme(
        &self,
        user_id: UserId,
        theme: &str,
    ) -> Result<UserSettings, RepositoryError> {
        let settings = sqlx::query_as::<_, UserSettings>(&format!(
            "INSERT INTO store.user_settings (user_id, theme)
             VALUES ($1, $2)
             ON CONFLICT (user_id)
             DO UPDATE SET theme = $2, updated_at = now()
             RETURNING {USER_SETTINGS_COLUMNS}"
        ))
        .bind(user_id)
        .bind(theme)
        .fetch_one(self.pool)
        .await?;

        Ok(settings)
    }

    /// Fetch the restaurant settings singleton, creating the default row
    /// on first access.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn get_or_create_restaurant(&self) -> Result<RestaurantSettings, RepositoryError> {
        sqlx::query("INSERT INTO store.restaurant_settings (id) VALUES (1) ON CONFLICT (id) DO NOTHING")
            .execute(self.pool)
            .await?;

        let settings = sqlx::query_as::<_, RestaurantSettings>(&format!(
            "SELECT {RESTAURANT_COLUMNS} FROM store.restaurant_settings WHERE id = 1"
        ))
        .fetch_one(self.pool)
        .await?;

        Ok(settings)
    }
}
