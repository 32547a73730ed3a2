//! Authenticated callers.
//!
//! Customer and admin tokens carry different claim shapes but share one
//! signing secret. [`Principal`] is the tagged union a verified token
//! decodes to, so a route can require exactly the shape it serves and
//! reject the other with a permission error rather than a signature error.

use serde::{Deserialize, Serialize};

use super::{AdminRole, Email};
use super::{AdminId, UserId};

/// Claims carried by a customer token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserClaims {
    /// Subject: the user's id.
    pub sub: UserId,
    pub email: Email,
}

/// Fine-grained admin capabilities.
///
/// Serialized with the field spellings the admin panel sends
/// (`manageUsers`, ...). Stored in Postgres as JSONB.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminPermissions {
    pub manage_users: bool,
    pub manage_products: bool,
    pub manage_orders: bool,
    pub manage_settings: bool,
}

impl AdminPermissions {
    /// Every capability granted.
    #[must_use]
    pub const fn all() -> Self {
        Self {
            manage_users: true,
            manage_products: true,
            manage_orders: true,
            manage_settings: true,
        }
    }

    /// Default grant for a freshly created admin of the given role.
    ///
    /// Super admins get everything; regular admins get everything except
    /// settings management.
    #[must_use]
    pub const fn for_role(role: AdminRole) -> Self {
        match role {
            AdminRole::SuperAdmin => Self::all(),
            AdminRole::Admin => Self {
                manage_users: true,
                manage_products: true,
                manage_orders: true,
                manage_settings: false,
            },
        }
    }
}

impl Default for AdminPermissions {
    fn default() -> Self {
        Self::for_role(AdminRole::Admin)
    }
}

/// Claims carried by an admin token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminClaims {
    /// Subject: the admin's id.
    pub sub: AdminId,
    pub email: Email,
    pub role: AdminRole,
    pub permissions: AdminPermissions,
}

/// A verified caller: either a customer or an admin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Principal {
    User(UserClaims),
    Admin(AdminClaims),
}

impl Principal {
    /// The customer claims, if this is a customer token.
    #[must_use]
    pub const fn as_user(&self) -> Option<&UserClaims> {
        match self {
            Self::User(claims) => Some(claims),
            Self::Admin(_) => None,
        }
    }

    /// The admin claims, if this is an admin token.
    #[must_use]
    pub const fn as_admin(&self) -> Option<&AdminClaims> {
        match self {
            Self::Admin(claims) => Some(claims),
            Self::User(_) => None,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_permissions_wire_spelling() {
        let json = serde_json::to_value(AdminPermissions::all()).unwrap();
        assert_eq!(json["manageUsers"], true);
        assert_eq!(json["manageSettings"], true);
    }

    #[test]
    fn test_default_admin_grant_excludes_settings() {
        let perms = AdminPermissions::default();
        assert!(perms.manage_orders);
        assert!(!perms.manage_settings);
    }

    #[test]
    fn test_principal_is_tagged() {
        let principal = Principal::User(UserClaims {
            sub: UserId::new(1),
            email: Email::parse("a@b.c").unwrap(),
        });
        let json = serde_json::to_value(&principal).unwrap();
        assert_eq!(json["kind"], "user");
        assert_eq!(json["sub"], 1);
    }

    #[test]
    fn test_accessors() {
        let principal = Principal::Admin(AdminClaims {
            sub: AdminId::new(2),
            email: Email::parse("ops@example.com").unwrap(),
            role: AdminRole::Admin,
            permissions: AdminPermissions::default(),
        });
        assert!(principal.as_admin().is_some());
        assert!(principal.as_user().is_none());
    }
}
