//! Authentication extractors for admin endpoints.
//!
//! The panel sends tokens as `Authorization: Bearer <jwt>` only; there is
//! no cookie path on the admin API. Verified claims carry the role and the
//! permission grants baked in at login, so per-capability checks need no
//! database round trip.

use axum::{extract::FromRequestParts, http::header, http::request::Parts};
use secrecy::ExposeSecret;

use tamarind_core::{AdminClaims, AdminRole, Principal, token};

use crate::error::{AppError, set_sentry_user};
use crate::state::AppState;

/// Extractor that requires a valid admin token.
pub struct RequireAdmin(pub AdminClaims);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)
            .ok_or_else(|| AppError::Unauthorized("Not authorized, please log in".to_owned()))?;

        let secret = state.config().jwt_secret.expose_secret().as_bytes();
        let principal = token::verify(&token, secret)?;

        match principal {
            Principal::Admin(claims) => {
                set_sentry_user(&claims.sub, Some(claims.email.as_str()));
                Ok(Self(claims))
            }
            Principal::User(_) => Err(AppError::Forbidden(
                "Customer tokens are not valid on the admin API".to_owned(),
            )),
        }
    }
}

/// Extractor that additionally requires the `super_admin` role.
pub struct RequireSuperAdmin(pub AdminClaims);

impl FromRequestParts<AppState> for RequireSuperAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let RequireAdmin(claims) = RequireAdmin::from_request_parts(parts, state).await?;

        if claims.role != AdminRole::SuperAdmin {
            return Err(AppError::Forbidden(
                "Super admin access required".to_owned(),
            ));
        }

        Ok(Self(claims))
    }
}

/// A capability an endpoint may require beyond base admin auth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    ManageUsers,
    ManageProducts,
    ManageOrders,
    ManageSettings,
}

impl Capability {
    const fn label(self) -> &'static str {
        match self {
            Self::ManageUsers => "manage admin accounts",
            Self::ManageProducts => "manage the menu",
            Self::ManageOrders => "manage orders",
            Self::ManageSettings => "manage settings",
        }
    }
}

/// Reject callers whose grant lacks the capability.
///
/// # Errors
///
/// Returns `AppError::Forbidden` when the capability is not granted.
pub fn ensure_permission(claims: &AdminClaims, capability: Capability) -> Result<(), AppError> {
    let granted = match capability {
        Capability::ManageUsers => claims.permissions.manage_users,
        Capability::ManageProducts => claims.permissions.manage_products,
        Capability::ManageOrders => claims.permissions.manage_orders,
        Capability::ManageSettings => claims.permissions.manage_settings,
    };

    if granted {
        Ok(())
    } else {
        Err(AppError::Forbidden(format!(
            "You do not have permission to {}",
            capability.label()
        )))
    }
}

fn bearer_token(parts: &Parts) -> Option<String> {
    parts
        .headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::to_owned)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use axum::http::Request;
    use tamarind_core::{AdminId, AdminPermissions, Email};

    fn claims_with(permissions: AdminPermissions) -> AdminClaims {
        AdminClaims {
            sub: AdminId::new(1),
            email: Email::parse("ops@example.com").unwrap(),
            role: AdminRole::Admin,
            permissions,
        }
    }

    #[test]
    fn test_bearer_token_extraction() {
        let parts = Request::builder()
            .header("authorization", "Bearer abc.def.ghi")
            .body(())
            .unwrap()
            .into_parts()
            .0;
        assert_eq!(bearer_token(&parts).as_deref(), Some("abc.def.ghi"));
    }

    #[test]
    fn test_cookie_is_not_a_credential_here() {
        let parts = Request::builder()
            .header("cookie", "token=abc.def.ghi")
            .body(())
            .unwrap()
            .into_parts()
            .0;
        assert_eq!(bearer_token(&parts), None);
    }

    #[test]
    fn test_default_admin_grant_cannot_manage_settings() {
        let claims = claims_with(AdminPermissions::default());
        assert!(ensure_permission(&claims, Capability::ManageOrders).is_ok());
        assert!(ensure_permission(&claims, Capability::ManageSettings).is_err());
    }

    #[test]
    fn test_full_grant_passes_all_checks() {
        let claims = claims_with(AdminPermissions::all());
        for capability in [
            Capability::ManageUsers,
            Capability::ManageProducts,
            Capability::ManageOrders,
            Capability::ManageSettings,
        ] {
            assert!(ensure_permission(&claims, capability).is_ok());
        }
    }
}
