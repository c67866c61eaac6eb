//! Nugget access-token client.
//!
//! The embedded support widget authenticates each visitor with a short-lived
//! access token minted by Nugget's auth API. The server holds the Nugget
//! credential; browsers only ever see the minted token.
//!
//! # API Reference
//!
//! - Endpoint: `POST https://api.nugget.com/unified-support/auth/users/getAccessToken`
//! - Authentication: credential sent verbatim in `Authorization`
//! - Request: `{"uid", "clientId", "platform", "displayName"}`
//! - Response: `{"success": true, "accessToken": "eyJ..."}`

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::NuggetConfig;

/// Platform reported for every visitor.
pub const PLATFORM: &str = "desktop";

/// Display name for visitors who are not known users.
pub const GUEST_DISPLAY_NAME: &str = "Guest";

/// Errors that can occur when requesting a token from Nugget.
#[derive(Debug, Error)]
pub enum NuggetError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Nugget answered with a non-success status.
    #[error("Nugget rejected the request: {status}")]
    Rejected { status: u16, body: String },

    /// Nugget answered 2xx without a usable token.
    #[error("No access token in response")]
    MissingToken,

    /// Client could not be configured.
    #[error("Nugget configuration error: {0}")]
    Config(String),
}

/// Body sent to the token endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPayload {
    /// Visitor id (a known user id or a per-session guest id)
    pub uid: String,

    /// Our Nugget client id
    pub client_id: i64,

    /// Always [`PLATFORM`]
    pub platform: String,

    /// Name shown to agents
    pub display_name: String,
}

impl TokenPayload {
    /// Payload for visitor `uid`, named `display_name` or [`GUEST_DISPLAY_NAME`]
    pub fn new(uid: impl Into<String>, client_id: i64, display_name: Option<&str>) -> Self {
        Self {
            uid: uid.into(),
            client_id,
            platform: PLATFORM.to_string(),
            display_name: display_name.unwrap_or(GUEST_DISPLAY_NAME).to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TokenResponse {
    #[serde(default)]
    success: bool,

    #[serde(default)]
    access_token: Option<String>,
}

/// Source of chat access tokens.
#[async_trait]
pub trait TokenIssuer: Send + Sync {
    /// Mints an access token for the visitor described by `payload`.
    async fn issue_token(&self, payload: &TokenPayload) -> Result<String, NuggetError>;
}

/// Nugget auth API client.
#[derive(Clone)]
pub struct NuggetClient {
    inner: Arc<NuggetClientInner>,
}

struct NuggetClientInner {
    client: reqwest::Client,
    auth_url: String,
}

impl NuggetClient {
    /// Create a new Nugget client.
    ///
    /// # Errors
    ///
    /// Returns error if the credential is not a valid header value or the
    /// HTTP client fails to build.
    pub fn new(config: &NuggetConfig) -> Result<Self, NuggetError> {
        let mut headers = HeaderMap::new();

        let mut auth_value = HeaderValue::from_str(config.auth_token.expose_secret())
            .map_err(|_| NuggetError::Config("credential is not a valid header value".to_string()))?;
        auth_value.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth_value);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            inner: Arc::new(NuggetClientInner {
                client,
                auth_url: config.auth_url.clone(),
            }),
        })
    }
}

#[async_trait]
impl TokenIssuer for NuggetClient {
    async fn issue_token(&self, payload: &TokenPayload) -> Result<String, NuggetError> {
        tracing::info!(
            uid = %payload.uid,
            client_id = payload.client_id,
            display_name = %payload.display_name,
            "Requesting Nugget access token"
        );

        let response = self
            .inner
            .client
            .post(&self.inner.auth_url)
            .json(payload)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!(status = status.as_u16(), "Nugget responded");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = status.as_u16(), body = %body, "Nugget API error");
            return Err(NuggetError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        let parsed: TokenResponse = serde_json::from_str(&body).map_err(|e| {
            tracing::warn!(error = %e, "Unparseable Nugget token response");
            NuggetError::MissingToken
        })?;

        match parsed.access_token {
            Some(token) if parsed.success && !token.is_empty() => {
                tracing::debug!(token_len = token.len(), "Received Nugget access token");
                Ok(token)
            }
            _ => {
                tracing::warn!(success = parsed.success, "Nugget response carried no access token");
                Err(NuggetError::MissingToken)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_serialization() {
        let payload = TokenPayload::new("guest_abc", 9, None);
        let json = serde_json::to_value(&payload).unwrap();

        assert_eq!(json["uid"], "guest_abc");
        assert_eq!(json["clientId"], 9);
        assert_eq!(json["platform"], "desktop");
        assert_eq!(json["displayName"], "Guest");
    }

    #[test]
    fn test_payload_uses_known_name() {
        let payload = TokenPayload::new("u_3", 9, Some("SellerDelay User3"));
        assert_eq!(payload.display_name, "SellerDelay User3");
    }

    #[test]
    fn test_token_response_defaults() {
        let parsed: TokenResponse = serde_json::from_str("{}").unwrap();
        assert!(!parsed.success);
        assert!(parsed.access_token.is_none());
    }
}
