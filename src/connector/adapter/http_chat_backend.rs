use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, warn};

use crate::connector::adapter::ChatBackend;
use crate::domain::{ChatRequest, ChatResponse, ClientError};

/// Default target: the Rahalah API served locally on its standard port.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
/// Environment variable overriding the backend base URL.
pub const BASE_URL_ENV: &str = "RAHALAH_API_URL";
const CHAT_PATH: &str = "/api/chat";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP transport for the Rahalah chat API.
///
/// Implements [`ChatBackend`] so higher-level components stay decoupled from
/// transport and serialization details.
///
/// **Local-first defaults**: targets the backend on `http://localhost:8000`.
/// Override via the environment to target a deployed instance:
///
/// ```text
/// RAHALAH_API_URL=https://api.rahalah.example
/// ```
///
/// Each call is a single attempt with a 30-second timeout.  Failures are
/// logged with their original cause, then normalized into [`ClientError`].
pub struct HttpChatBackend {
    client: reqwest::Client,
    /// Full chat endpoint URL (base + CHAT_PATH).
    chat_url: String,
    /// Service root, used by the health probe (e.g. `http://localhost:8000/`).
    health_url: String,
    base_url: String,
}

impl HttpChatBackend {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base: String = base_url.into();
        let trimmed = base.trim_end_matches('/');
        let chat_url = format!("{trimmed}{CHAT_PATH}");
        let health_url = format!("{trimmed}/");
        Self {
            client: reqwest::Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .unwrap_or_default(),
            chat_url,
            health_url,
            base_url: trimmed.to_string(),
        }
    }

    /// Construct from the environment with local-first defaults:
    ///
    /// | Variable          | Default                 | Purpose                |
    /// |-------------------|-------------------------|------------------------|
    /// | `RAHALAH_API_URL` | `http://localhost:8000` | Backend base URL       |
    pub fn from_env() -> Self {
        Self::new(Self::configured_base_url())
    }

    /// Resolve the base URL the environment currently selects.
    pub fn configured_base_url() -> String {
        std::env::var(BASE_URL_ENV).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Map a transport failure onto the error taxonomy, logging the original
    /// cause first.
    fn transport_error(context: &str, e: reqwest::Error) -> ClientError {
        warn!("HttpChatBackend: {context} failed: {e}");
        if e.is_connect() || e.is_timeout() {
            ClientError::NoResponse
        } else {
            ClientError::Unknown
        }
    }

    /// Derive a human-readable message from a non-2xx body: prefer `detail`,
    /// then `message`, then a synthesized status string.
    fn error_message(status: u16, body: &str) -> String {
        let fallback = format!("Server error: {status}");
        let Ok(payload) = serde_json::from_str::<Value>(body) else {
            return fallback;
        };
        extract_string(&payload, "detail")
            .or_else(|| extract_string(&payload, "message"))
            .unwrap_or(fallback)
    }

    async fn read_json(context: &str, response: reqwest::Response) -> Result<Value, ClientError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("HttpChatBackend: {context} returned {status}: {body}");
            return Err(ClientError::http(
                status.as_u16(),
                Self::error_message(status.as_u16(), &body),
            ));
        }
        response.json::<Value>().await.map_err(|e| {
            warn!("HttpChatBackend: {context} returned an unreadable body: {e}");
            ClientError::Unknown
        })
    }
}

/// Non-empty string field lookup; backends sometimes send `detail` as a
/// non-string (e.g. validation error arrays), which falls through here.
fn extract_string(payload: &Value, field: &str) -> Option<String> {
    payload
        .get(field)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

#[async_trait]
impl ChatBackend for HttpChatBackend {
    async fn send_chat_message(&self, request: &ChatRequest) -> Result<ChatResponse, ClientError> {
        debug!("HttpChatBackend: sending chat message to {}", self.chat_url);
        let response = self
            .client
            .post(&self.chat_url)
            .json(request)
            .send()
            .await
            .map_err(|e| Self::transport_error("chat request", e))?;
        Self::read_json("chat request", response)
            .await
            .map(ChatResponse::new)
    }

    async fn health_check(&self) -> Result<Value, ClientError> {
        debug!("HttpChatBackend: probing {}", self.health_url);
        let response = self
            .client
            .get(&self.health_url)
            .send()
            .await
            .map_err(|e| Self::transport_error("health check", e))?;
        Self::read_json("health check", response).await
    }
}
