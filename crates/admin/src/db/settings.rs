//! Restaurant settings repository.

use sqlx::PgPool;

use super::RepositoryError;
use crate::models::RestaurantSettings;
use crate::models::settings::{
    DeliverySettings, GeneralSettings, HoursSettings, NotificationSettings, RegionalSettings,
};

const RESTAURANT_COLUMNS: &str = "restaurant_name, contact_email, phone_number, address, \
     opening_time, closing_time, is_open, delivery_fee, minimum_order, delivery_radius, \
     estimated_delivery_time, email_notifications, sms_notifications, low_stock_alerts, \
     new_order_alerts, currency, timezone, updated_at";

/// Repository for the restaurant settings singleton.
pub struct SettingsRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> SettingsRepository<'a> {
    /// Create a new settings repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Fetch the settings singleton, creating the default row on first
    /// access.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn get_or_create(&self) -> Result<RestaurantSettings, RepositoryError> {
        self.ensure_row().await?;

        let settings = sqlx::query_as::<_, RestaurantSettings>(&format!(
            "SELECT {RESTAURANT_COLUMNS} FROM store.restaurant_settings WHERE id = 1"
        ))
        .fetch_one(self.pool)
        .await?;

        Ok(settings)
    }

    /// Insert the default row if it doesn't exist yet.
    async fn ensure_row(&self) -> Result<(), RepositoryError> {
        sqlx::query(
            "INSERT INTO store.restaurant_settings (id) VALUES (1) ON CONFLICT (id) DO NOTHING",
        )
        .execute(self.pool)
        .await?;
        Ok(())
    }

    /// Replace every editable field at once.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn replace(
        &self,
        settings: &RestaurantSettings,
    ) -> Result<RestaurantSettings, RepositoryError> {
        self.ensure_row().await?;
        let updated = sqlx::query_as::<_, RestaurantSettings>(&format!(
            "UPDATE store.restaurant_settings
             SET restaurant_name = $1, contact_email = $2, phone_number = $3, address = $4,
                 opening_time = $5, closing_time = $6, is_open = $7, delivery_fee = $8,
                 minimum_order = $9, delivery_radius = $10, estimated_delivery_time = $11,
                 email_notifications = $12, sms_notifications = $13, low_stock_alerts = $14,
                 new_order_alerts = $15, currency = $16, timezone = $17, updated_at = now()
             WHERE id = 1
             RETURNING {RESTAURANT_COLUMNS}"
        ))
        .bind(&settings.restaurant_name)
        .bind(&settings.contact_email)
        .bind(&settings.phone_number)
        .bind(&settings.address)
        .bind(&settings.opening_time)
        .bind(&settings.closing_time)
        .bind(settings.is_open)
        .bind(settings.delivery_fee)
        .bind(settings.minimum_order)
        .bind(settings.delivery_radius)
        .bind(&settings.estimated_delivery_time)
        .bind(settings.email_notifications)
        .bind(settings.sms_notifications)
        .bind(settings.low_stock_alerts)
        .bind(settings.new_order_alerts)
        .bind(&settings.currency)
        .bind(&settings.timezone)
        .fetch_one(self.pool)
        .await?;

        Ok(updated)
    }

    /// Update the identity and contact section.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn update_general(
        &self,
        general: &GeneralSettings,
    ) -> Result<RestaurantSettings, RepositoryError> {
        self.ensure_row().await?;
        let updated = sqlx::query_as::<_, RestaurantSettings>(&format!(
            "UPDATE store.restaurant_settings
             SET restaurant_name = $1, contact_email = $2, phone_number = $3, address = $4,
                 updated_at = now()
             WHERE id = 1
             RETURNING {RESTAURANT_COLUMNS}"
        ))
        .bind(&general.restaurant_name)
        .bind(&general.contact_email)
        .bind(&general.phone_number)
        .bind(&general.address)
        .fetch_one(self.pool)
        .await?;

        Ok(updated)
    }

    /// Update opening hours and the open/closed switch.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn update_hours(
        &self,
        hours: &HoursSettings,
    ) -> Result<RestaurantSettings, RepositoryError> {
        self.ensure_row().await?;
        let updated = sqlx::query_as::<_, RestaurantSettings>(&format!(
            "UPDATE store.restaurant_settings
             SET opening_time = $1, closing_time = $2, is_open = $3, updated_at = now()
             WHERE id = 1
             RETURNING {RESTAURANT_COLUMNS}"
        ))
        .bind(&hours.opening_time)
        .bind(&hours.closing_time)
        .bind(hours.is_open)
        .fetch_one(self.pool)
        .await?;

        Ok(updated)
    }

    /// Update delivery pricing and reach.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn update_delivery(
        &self,
        delivery: &DeliverySettings,
    ) -> Result<RestaurantSettings, RepositoryError> {
        self.ensure_row().await?;
        let updated = sqlx::query_as::<_, RestaurantSettings>(&format!(
            "UPDATE store.restaurant_settings
             SET delivery_fee = $1, minimum_order = $2, delivery_radius = $3,
                 estimated_delivery_time = $4, updated_at = now()
             WHERE id = 1
             RETURNING {RESTAURANT_COLUMNS}"
        ))
        .bind(delivery.delivery_fee)
        .bind(delivery.minimum_order)
        .bind(delivery.delivery_radius)
        .bind(&delivery.estimated_delivery_time)
        .fetch_one(self.pool)
        .await?;

        Ok(updated)
    }

    /// Update the staff notification toggles.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn update_notifications(
        &self,
        notifications: NotificationSettings,
    ) -> Result<RestaurantSettings, RepositoryError> {
        self.ensure_row().await?;
        let updated = sqlx::query_as::<_, RestaurantSettings>(&format!(
            "UPDATE store.restaurant_settings
             SET email_notifications = $1, sms_notifications = $2, low_stock_alerts = $3,
                 new_order_alerts = $4, updated_at = now()
             WHERE id = 1
             RETURNING {RESTAURANT_COLUMNS}"
        ))
        .bind(notifications.email_notifications)
        .bind(notifications.sms_notifications)
        .bind(notifications.low_stock_alerts)
        .bind(notifications.new_order_alerts)
        .fetch_one(self.pool)
        .await?;

        Ok(updated)
    }

    /// Update currency and timezone.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn update_regional(
        &self,
        regional: &RegionalSettings,
    ) -> Result<RestaurantSettings, RepositoryError> {
        self.ensure_row().await?;
        let updated = sqlx::query_as::<_, RestaurantSettings>(&format!(
            "UPDATE store.restaurant_settings
             SET currency = $1, timezone = $2, updated_at = now()
             WHERE id = 1
             RETURNING {RESTAURANT_COLUMNS}"
        ))
        .bind(&regional.currency)
        .bind(&regional.timezone)
        .fetch_one(self.pool)
        .await?;

        Ok(updated)
    }
}
