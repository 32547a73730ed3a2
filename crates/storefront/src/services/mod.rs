//! Business logic services for the storefront.
//!
//! - `auth` - registration, login, password change and reset
//! - `orders` - checkout orchestration (identity, snapshots, totals, payment split)
//! - `stripe` - thin Stripe Checkout API client

pub mod auth;
pub mod orders;
pub mod stripe;
