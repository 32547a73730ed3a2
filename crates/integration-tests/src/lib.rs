//! End-to-end test support for the Tamarind servers.
//!
//! These tests drive real HTTP against running servers and therefore sit
//! behind `#[ignore]`. To run them:
//!
//! ```bash
//! # Migrate and seed, then start both servers
//! cargo run -p tamarind-cli -- migrate all
//! cargo run -p tamarind-cli -- seed
//! cargo run -p tamarind-storefront &
//! cargo run -p tamarind-admin &
//!
//! cargo test -p tamarind-integration-tests -- --ignored
//! ```
//!
//! Base URLs come from `STOREFRONT_URL` and `ADMIN_URL` (defaults:
//! `http://127.0.0.1:3000` and `http://127.0.0.1:3001`). The admin tests
//! additionally need `ADMIN_EMAIL` and `ADMIN_PASSWORD` for an existing
//! account with full permissions.

use reqwest::Client;
use serde_json::Value;

/// A logged-in storefront session.
pub struct Session {
    pub token: String,
    pub email: String,
}

/// Shared handle for talking to both servers.
pub struct TestContext {
    pub client: Client,
    pub storefront_url: String,
    pub admin_url: String,
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

impl TestContext {
    /// Build a context from the environment.
    #[must_use]
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            storefront_url: std::env::var("STOREFRONT_URL")
                .unwrap_or_else(|_| "http://127.0.0.1:3000".to_owned()),
            admin_url: std::env::var("ADMIN_URL")
                .unwrap_or_else(|_| "http://127.0.0.1:3001".to_owned()),
        }
    }

    /// POST a JSON body to a storefront path.
    ///
    /// # Panics
    ///
    /// Panics if the request fails or the response is not JSON.
    pub async fn post(&self, path: &str, token: Option<&str>, body: &Value) -> (u16, Value) {
        let url = format!("{}{path}", self.storefront_url);
        self.send(self.client.post(url).json(body), token).await
    }

    /// GET a storefront path.
    ///
    /// # Panics
    ///
    /// Panics if the request fails or the response is not JSON.
    pub async fn get(&self, path: &str, token: Option<&str>) -> (u16, Value) {
        let url = format!("{}{path}", self.storefront_url);
        self.send(self.client.get(url), token).await
    }

    /// PUT a JSON body to a storefront path.
    ///
    /// # Panics
    ///
    /// Panics if the request fails or the response is not JSON.
    pub async fn put(&self, path: &str, token: Option<&str>, body: &Value) -> (u16, Value) {
        let url = format!("{}{path}", self.storefront_url);
        self.send(self.client.put(url).json(body), token).await
    }

    /// DELETE a storefront path.
    ///
    /// # Panics
    ///
    /// Panics if the request fails or the response is not JSON.
    pub async fn delete(&self, path: &str, token: Option<&str>) -> (u16, Value) {
        let url = format!("{}{path}", self.storefront_url);
        self.send(self.client.delete(url), token).await
    }

    /// POST a JSON body to an admin path.
    ///
    /// # Panics
    ///
    /// Panics if the request fails or the response is not JSON.
    pub async fn admin_post(&self, path: &str, token: Option<&str>, body: &Value) -> (u16, Value) {
        let url = format!("{}{path}", self.admin_url);
        self.send(self.client.post(url).json(body), token).await
    }

    /// GET an admin path.
    ///
    /// # Panics
    ///
    /// Panics if the request fails or the response is not JSON.
    pub async fn admin_get(&self, path: &str, token: Option<&str>) -> (u16, Value) {
        let url = format!("{}{path}", self.admin_url);
        self.send(self.client.get(url), token).await
    }

    /// PUT a JSON body to an admin path.
    ///
    /// # Panics
    ///
    /// Panics if the request fails or the response is not JSON.
    pub async fn admin_put(&self, path: &str, token: Option<&str>, body: &Value) -> (u16, Value) {
        let url = format!("{}{path}", self.admin_url);
        self.send(self.client.put(url).json(body), token).await
    }

    /// DELETE an admin path.
    ///
    /// # Panics
    ///
    /// Panics if the request fails or the response is not JSON.
    pub async fn admin_delete(&self, path: &str, token: Option<&str>) -> (u16, Value) {
        let url = format!("{}{path}", self.admin_url);
        self.send(self.client.delete(url), token).await
    }

    async fn send(&self, request: reqwest::RequestBuilder, token: Option<&str>) -> (u16, Value) {
        let request = match token {
            Some(token) => request.bearer_auth(token),
            None => request,
        };
        let response = request.send().await.expect("request failed");
        let status = response.status().as_u16();
        let body = response.json::<Value>().await.expect("non-JSON response");
        (status, body)
    }

    /// Register a fresh account with a unique email and return its session.
    ///
    /// # Panics
    ///
    /// Panics if registration does not succeed.
    pub async fn register_user(&self) -> Session {
        let email = format!("it-{}@example.com", uuid::Uuid::new_v4().simple());
        let (status, body) = self
            .post(
                "/api/user/register",
                None,
                &serde_json::json!({
                    "name": "Integration Tester",
                    "username": "it-tester",
                    "email": email,
                    "password": "passw0rd-long-enough",
                }),
            )
            .await;
        assert_eq!(status, 200, "registration failed: {body}");

        Session {
            token: body["token"].as_str().expect("missing token").to_owned(),
            email,
        }
    }

    /// Login to the admin API using `ADMIN_EMAIL` / `ADMIN_PASSWORD`.
    ///
    /// # Panics
    ///
    /// Panics if the variables are unset or the login fails.
    pub async fn admin_login(&self) -> String {
        let email = std::env::var("ADMIN_EMAIL").expect("ADMIN_EMAIL not set");
        let password = std::env::var("ADMIN_PASSWORD").expect("ADMIN_PASSWORD not set");

        let (status, body) = self
            .admin_post(
                "/api/admin/login",
                None,
                &serde_json::json!({ "email": email, "password": password }),
            )
            .await;
        assert_eq!(status, 200, "admin login failed: {body}");

        body["token"].as_str().expect("missing token").to_owned()
    }

    /// Look up a seeded catalog item by name.
    ///
    /// # Panics
    ///
    /// Panics if the item is not in the catalog.
    pub async fn item_by_name(&self, name: &str) -> Value {
        let (status, body) = self.get("/api/items", None).await;
        assert_eq!(status, 200);

        body["items"]
            .as_array()
            .expect("missing items")
            .iter()
            .find(|item| item["name"] == name)
            .unwrap_or_else(|| panic!("item {name} not seeded"))
            .clone()
    }
}
