//! Order management through the admin API.
//!
//! Needs both servers running plus `ADMIN_EMAIL` / `ADMIN_PASSWORD` for an
//! account with the manageOrders permission.

#![allow(clippy::unwrap_used)]

use serde_json::json;
use tamarind_integration_tests::TestContext;

/// Place a cash order through the storefront and return its id.
async fn place_order(ctx: &TestContext) -> serde_json::Value {
    let session = ctx.register_user().await;
    let item = ctx.item_by_name("Jollof Rice").await;
    let (status, body) = ctx
        .post(
            "/api/orders",
            Some(&session.token),
            &json!({
                "items": [{ "itemId": item["id"], "quantity": 1 }],
                "paymentMethod": "cod",
            }),
        )
        .await;
    assert_eq!(status, 200, "order failed: {body}");
    body["order"]["id"].clone()
}

#[tokio::test]
#[ignore = "requires running servers and an admin account"]
async fn status_advances_forward_only() {
    let ctx = TestContext::new();
    let admin_token = Some(ctx.admin_login().await);
    let admin_token = admin_token.as_deref();
    let order_id = place_order(&ctx).await;

    // Cash orders start at confirmed; advancing is allowed
    let (status, body) = ctx
        .admin_put(
            &format!("/api/admin/orders/{order_id}/status"),
            admin_token,
            &json!({ "status": "processing" }),
        )
        .await;
    assert_eq!(status, 200, "advance failed: {body}");
    assert_eq!(body["order"]["status"], "processing");

    // Moving backward is not
    let (status, body) = ctx
        .admin_put(
            &format!("/api/admin/orders/{order_id}/status"),
            admin_token,
            &json!({ "status": "confirmed" }),
        )
        .await;
    assert_eq!(status, 400);
    assert!(
        body["message"]
            .as_str()
            .unwrap()
            .starts_with("Cannot change order status"),
        "unexpected message: {body}"
    );

    // Neither is standing still
    let (status, _) = ctx
        .admin_put(
            &format!("/api/admin/orders/{order_id}/status"),
            admin_token,
            &json!({ "status": "processing" }),
        )
        .await;
    assert_eq!(status, 400);
}

#[tokio::test]
#[ignore = "requires running servers and an admin account"]
async fn delivered_is_terminal() {
    let ctx = TestContext::new();
    let admin_token = Some(ctx.admin_login().await);
    let admin_token = admin_token.as_deref();
    let order_id = place_order(&ctx).await;

    // Skipping intermediate steps is fine
    let (status, _) = ctx
        .admin_put(
            &format!("/api/admin/orders/{order_id}/status"),
            admin_token,
            &json!({ "status": "delivered" }),
        )
        .await;
    assert_eq!(status, 200);

    // But a delivered order cannot be cancelled
    let (status, _) = ctx
        .admin_put(
            &format!("/api/admin/orders/{order_id}/status"),
            admin_token,
            &json!({ "status": "cancelled" }),
        )
        .await;
    assert_eq!(status, 400);
}

#[tokio::test]
#[ignore = "requires running servers and an admin account"]
async fn customer_tokens_are_rejected() {
    let ctx = TestContext::new();
    let session = ctx.register_user().await;

    let (status, body) = ctx
        .admin_get("/api/admin/orders", Some(&session.token))
        .await;
    assert_eq!(status, 403);
    assert_eq!(body["success"], false);
}

#[tokio::test]
#[ignore = "requires running servers and an admin account"]
async fn order_listing_requires_a_token() {
    let ctx = TestContext::new();
    let (status, _) = ctx.admin_get("/api/admin/orders", None).await;
    assert_eq!(status, 401);
}
