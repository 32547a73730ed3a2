//! JWT signing and verification.
//!
//! One HS256 secret signs both customer and admin tokens; the claim shape
//! (the `kind` tag) tells them apart at verification time. Customer tokens
//! live 30 days, admin tokens 8 hours.

use chrono::{TimeDelta, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, errors::ErrorKind};
use serde::{Deserialize, Serialize};

use crate::types::{AdminClaims, Principal, UserClaims};

/// Errors from signing or verifying a token.
///
/// Expiry is distinguished from every other failure so clients can prompt
/// a re-login instead of treating the session as corrupt.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenError {
    #[error("token expired")]
    Expired,
    #[error("invalid token")]
    Invalid,
}

#[derive(Serialize, Deserialize)]
struct Claims {
    #[serde(flatten)]
    principal: Principal,
    iat: i64,
    exp: i64,
}

/// Customer token lifetime.
#[must_use]
pub fn user_token_ttl() -> TimeDelta {
    TimeDelta::days(30)
}

/// Admin token lifetime.
#[must_use]
pub fn admin_token_ttl() -> TimeDelta {
    TimeDelta::hours(8)
}

/// Sign a customer token.
///
/// # Errors
///
/// Returns [`TokenError::Invalid`] if encoding fails.
pub fn sign_user(claims: UserClaims, secret: &[u8]) -> Result<String, TokenError> {
    sign(Principal::User(claims), user_token_ttl(), secret)
}

/// Sign an admin token.
///
/// # Errors
///
/// Returns [`TokenError::Invalid`] if encoding fails.
pub fn sign_admin(claims: AdminClaims, secret: &[u8]) -> Result<String, TokenError> {
    sign(Principal::Admin(claims), admin_token_ttl(), secret)
}

fn sign(principal: Principal, ttl: TimeDelta, secret: &[u8]) -> Result<String, TokenError> {
    let now = Utc::now();
    let claims = Claims {
        principal,
        iat: now.timestamp(),
        exp: (now + ttl).timestamp(),
    };
    jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret),
    )
    .map_err(|_| TokenError::Invalid)
}

/// Verify a token and return the caller it identifies.
///
/// # Errors
///
/// Returns [`TokenError::Expired`] when the signature is valid but the
/// token is past its expiry, [`TokenError::Invalid`] for every other
/// failure (bad signature, malformed claims, wrong algorithm).
pub fn verify(token: &str, secret: &[u8]) -> Result<Principal, TokenError> {
    let validation = Validation::new(Algorithm::HS256);
    let data = jsonwebtoken::decode::<Claims>(token, &DecodingKey::from_secret(secret), &validation)
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => TokenError::Expired,
            _ => TokenError::Invalid,
        })?;
    Ok(data.claims.principal)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::{AdminId, AdminPermissions, AdminRole, Email, UserId};

    const SECRET: &[u8] = b"test-signing-secret-for-unit-tests-only";

    fn user_claims() -> UserClaims {
        UserClaims {
            sub: UserId::new(1),
            email: Email::parse("customer@example.com").unwrap(),
        }
    }

    fn admin_claims() -> AdminClaims {
        AdminClaims {
            sub: AdminId::new(9),
            email: Email::parse("ops@example.com").unwrap(),
            role: AdminRole::SuperAdmin,
            permissions: AdminPermissions::all(),
        }
    }

    #[test]
    fn test_user_roundtrip() {
        let token = sign_user(user_claims(), SECRET).unwrap();
        match verify(&token, SECRET).unwrap() {
            Principal::User(claims) => assert_eq!(claims, user_claims()),
            Principal::Admin(_) => panic!("expected user principal"),
        }
    }

    #[test]
    fn test_admin_roundtrip() {
        let token = sign_admin(admin_claims(), SECRET).unwrap();
        match verify(&token, SECRET).unwrap() {
            Principal::Admin(claims) => {
                assert_eq!(claims.role, AdminRole::SuperAdmin);
                assert!(claims.permissions.manage_settings);
            }
            Principal::User(_) => panic!("expected admin principal"),
        }
    }

    #[test]
    fn test_wrong_secret_is_invalid() {
        let token = sign_user(user_claims(), SECRET).unwrap();
        assert_eq!(
            verify(&token, b"a-different-secret").unwrap_err(),
            TokenError::Invalid
        );
    }

    #[test]
    fn test_expired_token_is_distinguished() {
        let token = sign(
            Principal::User(user_claims()),
            TimeDelta::try_seconds(-600).unwrap(),
            SECRET,
        )
        .unwrap();
        assert_eq!(verify(&token, SECRET).unwrap_err(), TokenError::Expired);
    }

    #[test]
    fn test_garbage_is_invalid() {
        assert_eq!(
            verify("not.a.token", SECRET).unwrap_err(),
            TokenError::Invalid
        );
    }
}
