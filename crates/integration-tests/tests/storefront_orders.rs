//! Order placement against a running storefront with a seeded catalog.

#![allow(clippy::unwrap_used)]

use serde_json::json;
use tamarind_integration_tests::TestContext;

#[tokio::test]
#[ignore = "requires a running storefront server with seeded catalog"]
async fn cod_order_finalizes_immediately() {
    let ctx = TestContext::new();
    let session = ctx.register_user().await;
    let token = Some(session.token.as_str());

    let meat_pie = ctx.item_by_name("Meat Pie").await;
    let sausage_roll = ctx.item_by_name("Sausage Roll").await;

    // Fill the cart so we can watch it empty on checkout
    ctx.post(
        "/api/cart",
        token,
        &json!({ "itemId": meat_pie["id"], "quantity": 2 }),
    )
    .await;

    let (status, body) = ctx
        .post(
            "/api/orders",
            token,
            &json!({
                "items": [
                    { "itemId": meat_pie["id"], "quantity": 2 },
                    { "itemId": sausage_roll["id"], "quantity": 1 },
                ],
                "paymentMethod": "cod",
                "tax": 0,
                "shipping": 0,
            }),
        )
        .await;
    assert_eq!(status, 200, "order failed: {body}");

    let order = &body["order"];
    // Prices come from the catalog: 600 * 2 + 400
    assert_eq!(order["subtotal"], 1600);
    assert_eq!(order["total"], 1600);
    assert_eq!(order["status"], "confirmed");
    assert_eq!(order["paymentStatus"], "succeeded");
    assert!(body["checkoutUrl"].is_null());

    // Cash checkout clears the cart
    let (_, body) = ctx.get("/api/cart", token).await;
    assert_eq!(body["cart"].as_array().unwrap().len(), 0);

    // And grants a reward point
    let (_, body) = ctx.get("/api/user/rewards", token).await;
    assert_eq!(body["rewards"]["points"], 1);

    // The order shows up in history
    let (_, body) = ctx.get("/api/orders", token).await;
    assert_eq!(body["orders"].as_array().unwrap().len(), 1);
}

#[tokio::test]
#[ignore = "requires a running storefront server with seeded catalog"]
async fn empty_order_is_rejected() {
    let ctx = TestContext::new();
    let session = ctx.register_user().await;
    let token = Some(session.token.as_str());

    let (status, body) = ctx
        .post(
            "/api/orders",
            token,
            &json!({ "items": [], "paymentMethod": "cod" }),
        )
        .await;
    assert_eq!(status, 400);
    assert_eq!(body["success"], false);
}

#[tokio::test]
#[ignore = "requires a running storefront server with seeded catalog"]
async fn orders_are_private_to_their_owner() {
    let ctx = TestContext::new();
    let owner = ctx.register_user().await;
    let other = ctx.register_user().await;

    let meat_pie = ctx.item_by_name("Meat Pie").await;
    let (_, body) = ctx
        .post(
            "/api/orders",
            Some(&owner.token),
            &json!({
                "items": [{ "itemId": meat_pie["id"], "quantity": 1 }],
                "paymentMethod": "cod",
            }),
        )
        .await;
    let order_id = body["order"]["id"].clone();

    let (status, _) = ctx
        .get(&format!("/api/orders/{order_id}"), Some(&other.token))
        .await;
    assert_eq!(status, 403);
}
