//! Domain types served by the admin API.
//!
//! Admin accounts live in the `admin` schema; orders, catalog items, and
//! restaurant settings are read from the storefront's `store` schema.

pub mod admin_user;
pub mod item;
pub mod order;
pub mod settings;

pub use admin_user::AdminUser;
pub use item::Item;
pub use order::{DeliveryDetails, Order, OrderLine};
pub use settings::{RestaurantSettings, SettingsSection};
