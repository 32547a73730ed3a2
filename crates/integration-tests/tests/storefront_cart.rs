//! Cart behavior against a running storefront with a seeded catalog.

#![allow(clippy::unwrap_used)]

use serde_json::json;
use tamarind_integration_tests::TestContext;

#[tokio::test]
#[ignore = "requires a running storefront server with seeded catalog"]
async fn add_update_and_clear() {
    let ctx = TestContext::new();
    let session = ctx.register_user().await;
    let token = Some(session.token.as_str());

    let item = ctx.item_by_name("Meat Pie").await;
    let item_id = item["id"].clone();

    // Two adds of the same item merge into one entry
    let (status, _) = ctx
        .post("/api/cart", token, &json!({ "itemId": item_id, "quantity": 1 }))
        .await;
    assert_eq!(status, 200);
    let (_, body) = ctx
        .post("/api/cart", token, &json!({ "itemId": item_id }))
        .await;
    let cart = body["cart"].as_array().unwrap();
    assert_eq!(cart.len(), 1);
    assert_eq!(cart[0]["quantity"], 2);

    // Set the quantity via the entry id
    let entry_id = cart[0]["id"].clone();
    let (status, body) = ctx
        .put(
            &format!("/api/cart/{entry_id}"),
            token,
            &json!({ "quantity": 5 }),
        )
        .await;
    assert_eq!(status, 200);
    assert_eq!(body["cart"][0]["quantity"], 5);

    // Clear empties the cart
    let (status, body) = ctx.delete("/api/cart", token).await;
    assert_eq!(status, 200);
    assert_eq!(body["cart"].as_array().unwrap().len(), 0);
}

#[tokio::test]
#[ignore = "requires a running storefront server with seeded catalog"]
async fn force_delete_is_idempotent() {
    let ctx = TestContext::new();
    let session = ctx.register_user().await;
    let token = Some(session.token.as_str());

    let item = ctx.item_by_name("Sausage Roll").await;
    let item_id = item["id"].clone();

    ctx.post("/api/cart", token, &json!({ "itemId": item_id, "quantity": 3 }))
        .await;

    // Plain delete decrements
    let (_, body) = ctx.delete(&format!("/api/cart/{item_id}"), token).await;
    assert_eq!(body["cart"][0]["quantity"], 2);

    // Force delete removes the entry, and a retry still succeeds
    let (status, body) = ctx
        .delete(&format!("/api/cart/{item_id}?force=true"), token)
        .await;
    assert_eq!(status, 200);
    assert_eq!(body["cart"].as_array().unwrap().len(), 0);

    let (status, body) = ctx
        .delete(&format!("/api/cart/{item_id}?force=true"), token)
        .await;
    assert_eq!(status, 200);
    assert_eq!(body["cart"].as_array().unwrap().len(), 0);
}
