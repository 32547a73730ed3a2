//! Authentication extractor for customer endpoints.
//!
//! Tokens arrive as `Authorization: Bearer <jwt>` or, for browser clients,
//! as a `token` cookie. Either way the claims come out of the same
//! verification path in `tamarind_core::token`.

use axum::{extract::FromRequestParts, http::header, http::request::Parts};
use secrecy::ExposeSecret;

use tamarind_core::{Principal, UserClaims, token};

use crate::error::{AppError, set_sentry_user};
use crate::state::AppState;

/// Cookie used by the web client to carry the session token.
const TOKEN_COOKIE: &str = "token";

/// Extractor that requires a valid customer token.
///
/// ```rust,ignore
/// async fn handler(RequireUser(claims): RequireUser) -> impl IntoResponse {
///     format!("hello {}", claims.email)
/// }
/// ```
pub struct RequireUser(pub UserClaims);

impl FromRequestParts<AppState> for RequireUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = extract_token(parts).ok_or_else(|| {
            AppError::Unauthorized("Not authorized, please log in".to_owned())
        })?;

        let secret = state.config().jwt_secret.expose_secret().as_bytes();
        let principal = token::verify(&token, secret)?;

        match principal {
            Principal::User(claims) => {
                set_sentry_user(&claims.sub, Some(claims.email.as_str()));
                Ok(Self(claims))
            }
            Principal::Admin(_) => Err(AppError::Forbidden(
                "Admin tokens are not valid on the storefront".to_owned(),
            )),
        }
    }
}

fn extract_token(parts: &Parts) -> Option<String> {
    bearer_token(parts).or_else(|| cookie_token(parts))
}

fn bearer_token(parts: &Parts) -> Option<String> {
    parts
        .headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::to_owned)
}

fn cookie_token(parts: &Parts) -> Option<String> {
    let cookies = parts
        .headers
        .get(header::COOKIE)
        .and_then(|v| v.to_str().ok())?;

    cookie_value(cookies, TOKEN_COOKIE).map(str::to_owned)
}

/// Find one cookie's value in a `Cookie:` header.
fn cookie_value<'h>(header: &'h str, name: &str) -> Option<&'h str> {
    header.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        (key == name).then_some(value)
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts_with(header_name: &str, value: &str) -> Parts {
        Request::builder()
            .header(header_name, value)
            .body(())
            .unwrap()
            .into_parts()
            .0
    }

    #[test]
    fn test_bearer_header_wins() {
        let parts = parts_with("authorization", "Bearer abc.def.ghi");
        assert_eq!(extract_token(&parts).as_deref(), Some("abc.def.ghi"));
    }

    #[test]
    fn test_cookie_fallback() {
        let parts = parts_with("cookie", "theme=dark; token=abc.def.ghi; lang=en");
        assert_eq!(extract_token(&parts).as_deref(), Some("abc.def.ghi"));
    }

    #[test]
    fn test_no_credentials() {
        let parts = Request::builder().body(()).unwrap().into_parts().0;
        assert_eq!(extract_token(&parts), None);
    }

    #[test]
    fn test_non_bearer_scheme_ignored() {
        let parts = parts_with("authorization", "Basic dXNlcjpwYXNz");
        assert_eq!(extract_token(&parts), None);
    }
}
