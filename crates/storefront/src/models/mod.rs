//! Domain types for the storefront.
//!
//! These types represent validated domain objects separate from transport
//! shapes; most derive `sqlx::FromRow` so repositories can map rows directly.

pub mod cart;
pub mod item;
pub mod order;
pub mod settings;
pub mod user;

pub use cart::CartLine;
pub use item::Item;
pub use order::{DeliveryDetails, Order, OrderLine};
pub use settings::{
    AddressSettings, NotificationPrefs, PaymentPrefs, RestaurantSettings, UserSettings,
    DEFAULT_PAYMENT_METHODS, THEMES,
};
pub use user::User;
