/// Common test utilities for integration tests
///
/// This module provides shared infrastructure for integration tests:
/// - Test configuration with a dummy Nugget credential
/// - Router over a fixture-backed in-memory store
/// - A scripted token issuer standing in for Nugget
/// - Request helpers returning status and parsed JSON

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::Utc;
use secrecy::SecretString;
use serde_json::Value;
use squad1_api::app::{build_router, AppState};
use squad1_api::config::{ApiConfig, ChatConfig, Config, NuggetConfig, StoreConfig};
use squad1_api::nugget::{NuggetError, TokenIssuer, TokenPayload};
use squad1_shared::store::{MemoryStore, Store};
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

/// Credential configured for tests; must never show up in a response
pub const TEST_CREDENTIAL: &str = "Basic dGVzdDpzdXBlci1zZWNyZXQ=";

/// Client id configured for tests
pub const TEST_CLIENT_ID: i64 = 42;

/// What the mock issuer answers
#[derive(Debug, Clone)]
pub enum MockReply {
    Token(String),
    Reject(u16),
    NoToken,
}

/// Token issuer that records payloads and answers from a script
pub struct MockIssuer {
    reply: MockReply,
    pub calls: Mutex<Vec<TokenPayload>>,
}

impl MockIssuer {
    pub fn new(reply: MockReply) -> Self {
        Self {
            reply,
            calls: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl TokenIssuer for MockIssuer {
    async fn issue_token(&self, payload: &TokenPayload) -> Result<String, NuggetError> {
        self.calls.lock().unwrap().push(payload.clone());

        match &self.reply {
            MockReply::Token(token) => Ok(token.clone()),
            MockReply::Reject(status) => Err(NuggetError::Rejected {
                status: *status,
                body: "denied".to_string(),
            }),
            MockReply::NoToken => Err(NuggetError::MissingToken),
        }
    }
}

/// Configuration pointing Nugget at `auth_url`
pub fn test_config(auth_url: &str) -> Config {
    Config {
        api: ApiConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            cors_origins: vec!["*".to_string()],
            production: false,
        },
        store: StoreConfig::default(),
        nugget: NuggetConfig {
            client_id: TEST_CLIENT_ID,
            auth_token: SecretString::from(TEST_CREDENTIAL.to_string()),
            auth_url: auth_url.to_string(),
            domain: "security".to_string(),
            timeout_secs: 5,
        },
        chat: ChatConfig::default(),
    }
}

/// Test context containing all necessary resources
pub struct TestContext {
    pub app: axum::Router,
    pub store: Arc<dyn Store>,
    pub issuer: Arc<MockIssuer>,
}

impl TestContext {
    /// Fresh fixtures and a mock issuer minting `tok_test`
    pub fn new() -> Self {
        Self::with_reply(MockReply::Token("tok_test".to_string()))
    }

    pub fn with_reply(reply: MockReply) -> Self {
        let store: Arc<dyn Store> = Arc::new(MemoryStore::with_fixtures(Utc::now()));
        let issuer = Arc::new(MockIssuer::new(reply));
        let state = AppState::new(
            store.clone(),
            issuer.clone(),
            test_config("http://127.0.0.1:9/unused"),
        );

        Self {
            app: build_router(state),
            store,
            issuer,
        }
    }

    /// GET `uri`, returning status and JSON body
    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        send(&self.app, request).await
    }

    /// POST `body` as JSON to `uri`
    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.post_raw(uri, body.to_string()).await
    }

    /// POST a raw body with a JSON content type
    pub async fn post_raw(&self, uri: &str, body: String) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap();
        send(&self.app, request).await
    }
}

/// Sends a request through the router and parses the body as JSON
/// (`Value::Null` for non-JSON bodies)
pub async fn send(app: &axum::Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
    (status, json)
}
