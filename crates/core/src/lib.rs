//! Tamarind Core - Shared types library.
//!
//! This crate provides common types used across all Tamarind components:
//! - `storefront` - Customer-facing ordering API
//! - `admin` - Internal administration API
//! - `cli` - Command-line tools for migrations and management
//!
//! # Architecture
//!
//! The core crate contains only types and pure logic - no I/O, no database
//! access, no HTTP clients. This keeps it lightweight and allows it to be
//! used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, emails, and statuses
//! - [`token`] - JWT claims, signing, and verification
//! - [`rewards`] - The loyalty tier calculator

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod rewards;
pub mod token;
pub mod types;

pub use types::*;
