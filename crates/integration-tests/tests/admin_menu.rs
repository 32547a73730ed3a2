//! Menu management through the admin API and its visibility on the
//! storefront.
//!
//! Needs both servers running plus `ADMIN_EMAIL` / `ADMIN_PASSWORD` for an
//! account with the manageProducts permission.

#![allow(clippy::unwrap_used)]

use serde_json::json;
use tamarind_integration_tests::TestContext;

#[tokio::test]
#[ignore = "requires running servers and an admin account"]
async fn item_lifecycle() {
    let ctx = TestContext::new();
    let token = Some(ctx.admin_login().await);
    let token = token.as_deref();

    let name = format!("it-special-{}", uuid::Uuid::new_v4().simple());
    let (status, body) = ctx
        .admin_post(
            "/api/menu",
            token,
            &json!({
                "name": name,
                "description": "Weekly special",
                "price": 2500,
                "category": "Specials",
            }),
        )
        .await;
    assert_eq!(status, 200, "create failed: {body}");
    let item = &body["item"];
    let item_id = item["id"].clone();
    assert_eq!(item["hearts"], 0);

    // Reprice it
    let (status, body) = ctx
        .admin_put(
            &format!("/api/menu/{item_id}"),
            token,
            &json!({
                "name": name,
                "description": "Weekly special",
                "price": 2800,
                "category": "Specials",
            }),
        )
        .await;
    assert_eq!(status, 200, "update failed: {body}");
    assert_eq!(body["item"]["price"], 2800);

    let (status, _) = ctx.admin_delete(&format!("/api/menu/{item_id}"), token).await;
    assert_eq!(status, 200);

    // Gone for good
    let (status, _) = ctx
        .admin_put(
            &format!("/api/menu/{item_id}"),
            token,
            &json!({
                "name": name,
                "description": "Weekly special",
                "price": 2800,
                "category": "Specials",
            }),
        )
        .await;
    assert_eq!(status, 404);
}

#[tokio::test]
#[ignore = "requires running servers and an admin account"]
async fn blank_name_is_rejected() {
    let ctx = TestContext::new();
    let token = Some(ctx.admin_login().await);

    let (status, body) = ctx
        .admin_post(
            "/api/menu",
            token.as_deref(),
            &json!({ "name": "  ", "price": 1000, "category": "Specials" }),
        )
        .await;
    assert_eq!(status, 400);
    assert_eq!(body["message"], "Name is required");
}

#[tokio::test]
#[ignore = "requires running servers and an admin account"]
async fn category_filter_narrows_the_list() {
    let ctx = TestContext::new();
    let token = Some(ctx.admin_login().await);

    let (status, body) = ctx
        .admin_get("/api/menu?category=Drinks", token.as_deref())
        .await;
    assert_eq!(status, 200);
    let items = body["items"].as_array().unwrap();
    assert!(!items.is_empty());
    assert!(items.iter().all(|item| item["category"] == "Drinks"));
}
