//! Test application factory for integration tests.

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use chrono::{DateTime, Utc};
use http_body_util::BodyExt;
use std::sync::Arc;
use tower::ServiceExt;

use gifloom::models::{AppConfig, UserId};
use gifloom::server::{build_router, create_app_state_with};
use gifloom::services::{CooldownStore, HmacTokenVerifier, InMemoryCooldownStore, StoreError};

/// Shared HMAC secret for minting and verifying test tokens.
pub const TEST_SECRET: &str = "test-secret";

/// Test application with router and direct access to services
pub struct TestApp {
    router: axum::Router,
    pub verifier: Arc<HmacTokenVerifier>,
    pub store: Arc<dyn CooldownStore>,
}

impl TestApp {
    /// Create a test application with the in-memory cooldown store
    pub fn new() -> Self {
        Self::with_store(Arc::new(InMemoryCooldownStore::new()))
    }

    /// Create a test application around a custom cooldown store
    pub fn with_store(store: Arc<dyn CooldownStore>) -> Self {
        let config = Arc::new(AppConfig {
            token_secret: Some(TEST_SECRET.to_string()),
            ..AppConfig::default()
        });
        let verifier = Arc::new(HmacTokenVerifier::new(TEST_SECRET));

        let state = create_app_state_with(config, verifier.clone(), store.clone());
        let router = build_router(state);

        Self {
            router,
            verifier,
            store,
        }
    }

    /// Mint a valid bearer token for a user
    pub fn token_for(&self, user: &str) -> String {
        self.verifier.mint(&UserId::new(user))
    }

    /// POST /api/generate with an optional bearer token and a raw JSON body
    pub async fn generate(&self, token: Option<&str>, body: &str) -> TestResponse {
        let mut builder = Request::post("/api/generate").header("Content-Type", "application/json");
        if let Some(token) = token {
            builder = builder.header("Authorization", format!("Bearer {token}"));
        }
        self.request(builder.body(Body::from(body.to_string())).unwrap())
            .await
    }

    /// Make a POST request with custom headers and a JSON body
    pub async fn post_json(
        &self,
        path: &str,
        headers: &[(&str, &str)],
        body: &str,
    ) -> TestResponse {
        let mut builder = Request::post(path).header("Content-Type", "application/json");
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        self.request(builder.body(Body::from(body.to_string())).unwrap())
            .await
    }

    /// Make a GET request to the given path
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request(Request::get(path).body(Body::empty()).unwrap())
            .await
    }

    /// Make an OPTIONS request (CORS preflight)
    pub async fn options(&self, path: &str) -> TestResponse {
        self.request(
            Request::builder()
                .method("OPTIONS")
                .uri(path)
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }

    /// Send a request to the router
    async fn request(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Request failed");

        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes()
            .to_vec();

        TestResponse {
            status,
            headers,
            body,
        }
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

/// Test response with convenience methods
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: axum::http::HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    /// Parse body as JSON
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> T {
        serde_json::from_slice(&self.body).expect("Failed to parse JSON response")
    }

    /// Get body as string
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).to_string()
    }
}

/// Cooldown store whose check and/or update paths fail on demand, for
/// exercising the fail-open and swallowed-update policies.
pub struct FlakyStore {
    inner: InMemoryCooldownStore,
    fail_check: bool,
    fail_update: bool,
}

impl FlakyStore {
    pub fn failing_check() -> Self {
        Self {
            inner: InMemoryCooldownStore::new(),
            fail_check: true,
            fail_update: false,
        }
    }

    pub fn failing_update() -> Self {
        Self {
            inner: InMemoryCooldownStore::new(),
            fail_check: false,
            fail_update: true,
        }
    }
}

#[async_trait]
impl CooldownStore for FlakyStore {
    async fn last_generation(&self, user: &UserId) -> Result<Option<DateTime<Utc>>, StoreError> {
        if self.fail_check {
            return Err(StoreError::Unavailable("injected check failure".into()));
        }
        self.inner.last_generation(user).await
    }

    async fn record_generation(&self, user: &UserId, at: DateTime<Utc>) -> Result<(), StoreError> {
        if self.fail_update {
            return Err(StoreError::Unavailable("injected update failure".into()));
        }
        self.inner.record_generation(user, at).await
    }
}
