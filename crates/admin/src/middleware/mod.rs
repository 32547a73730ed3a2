//! Request middleware: authentication, rate limiting, request IDs.

pub mod auth;
pub mod rate_limit;
pub mod request_id;

pub use auth::{Capability, RequireAdmin, RequireSuperAdmin, ensure_permission};
pub use rate_limit::login_rate_limiter;
pub use request_id::request_id_middleware;
