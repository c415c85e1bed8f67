#![allow(dead_code)]

use serde_json::{json, Value};
use std::net::TcpListener;
use std::sync::Arc;
use user_api::auth::SessionKeys;
use user_api::startup::run;
use user_api::store::InMemoryUserStore;

pub const TEST_SECRET: &[u8] = b"integration-test-secret-value";

pub struct TestApp {
    pub address: String,
    pub store: Arc<InMemoryUserStore>,
    pub keys: SessionKeys,
    pub client: reqwest::Client,
}

/// Starts the server on a random port with a fresh in-memory store
pub fn spawn_app() -> TestApp {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();

    let store = Arc::new(InMemoryUserStore::new());
    let keys = SessionKeys::from_secret(TEST_SECRET).expect("Failed to build session keys");

    let server = run(listener, store.clone(), keys.clone()).expect("Failed to bind address");
    let _ = tokio::spawn(server);

    TestApp {
        address: format!("http://127.0.0.1:{}", port),
        store,
        keys,
        client: reqwest::Client::new(),
    }
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    pub async fn post_register(&self, body: &Value) -> reqwest::Response {
        self.client
            .post(&self.url("/register"))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn post_login(&self, body: &Value) -> reqwest::Response {
        self.client
            .post(&self.url("/login"))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    /// Registers `email` and logs in, returning the session token
    pub async fn register_and_login(&self, name: &str, email: &str, password: &str) -> String {
        let response = self
            .post_register(&json!({"name": name, "email": email, "password": password}))
            .await;
        assert_eq!(200, response.status().as_u16());

        let response = self
            .post_login(&json!({"email": email, "password": password}))
            .await;
        assert_eq!(200, response.status().as_u16());

        let body: Value = response.json().await.expect("Failed to parse response");
        body["token"].as_str().expect("No token in response").to_string()
    }

    /// Token for `email` minted with the server's own keys, without a login round trip
    pub fn token_for(&self, email: &str) -> String {
        self.keys.issue(email).expect("Failed to issue token")
    }
}
