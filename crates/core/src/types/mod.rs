//! Core types for Tamarind.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod price;
pub mod principal;
pub mod status;

pub use email::{Email, EmailError};
pub use id::*;
pub use price::Price;
pub use principal::{AdminClaims, AdminPermissions, Principal, UserClaims};
pub use status::*;
