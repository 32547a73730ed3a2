//! Admin account domain type.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

use tamarind_core::{AdminId, AdminPermissions, AdminRole, Email};

/// An admin panel account.
///
/// The password hash never leaves the repository layer; this struct is the
/// shape handed to routes and serialized to clients.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct AdminUser {
    pub id: AdminId,
    pub username: String,
    pub email: Email,
    pub name: String,
    pub role: AdminRole,
    #[sqlx(json)]
    pub permissions: AdminPermissions,
    /// Disabled accounts keep their row but cannot log in.
    pub is_active: bool,
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_shape_has_no_password_hash() {
        let admin = AdminUser {
            id: AdminId::new(1),
            username: "ops".to_string(),
            email: Email::parse("ops@example.com").unwrap(),
            name: "Ops".to_string(),
            role: AdminRole::Admin,
            permissions: AdminPermissions::default(),
            is_active: true,
            last_login: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let json = serde_json::to_value(&admin).unwrap();
        assert!(json.get("passwordHash").is_none());
        assert_eq!(json["role"], "admin");
        assert_eq!(json["permissions"]["manageOrders"], true);
        assert_eq!(json["isActive"], true);
    }
}
