//! Business logic sitting between routes and repositories.

pub mod auth;
