//! Account lifecycle against a running storefront.

#![allow(clippy::unwrap_used)]

use serde_json::json;
use tamarind_integration_tests::TestContext;

#[tokio::test]
#[ignore = "requires a running storefront server"]
async fn register_login_validate() {
    let ctx = TestContext::new();
    let session = ctx.register_user().await;

    // The registration token authenticates immediately
    let (status, body) = ctx.get("/api/user/validate", Some(&session.token)).await;
    assert_eq!(status, 200);
    assert_eq!(body["user"]["email"], session.email.as_str());

    // A fresh login issues a working token too
    let (status, body) = ctx
        .post(
            "/api/user/login",
            None,
            &json!({ "email": session.email, "password": "passw0rd-long-enough" }),
        )
        .await;
    assert_eq!(status, 200);
    assert!(body["token"].as_str().is_some());
}

#[tokio::test]
#[ignore = "requires a running storefront server"]
async fn duplicate_email_is_conflict() {
    let ctx = TestContext::new();
    let session = ctx.register_user().await;

    let (status, body) = ctx
        .post(
            "/api/user/register",
            None,
            &json!({
                "name": "Other",
                "username": "other",
                "email": session.email,
                "password": "passw0rd-long-enough",
            }),
        )
        .await;
    assert_eq!(status, 409);
    assert_eq!(body["success"], false);
}

#[tokio::test]
#[ignore = "requires a running storefront server"]
async fn wrong_password_is_unauthorized() {
    let ctx = TestContext::new();
    let session = ctx.register_user().await;

    let (status, _) = ctx
        .post(
            "/api/user/login",
            None,
            &json!({ "email": session.email, "password": "not-the-password" }),
        )
        .await;
    assert_eq!(status, 401);
}

#[tokio::test]
#[ignore = "requires a running storefront server"]
async fn protected_route_rejects_anonymous() {
    let ctx = TestContext::new();
    let (status, body) = ctx.get("/api/cart", None).await;
    assert_eq!(status, 401);
    assert_eq!(body["success"], false);
}
