use async_trait::async_trait;
use serde_json::Value;

use crate::domain::{ChatRequest, ChatResponse, ClientError};

/// An interface for exchanging chat turns with the Rahalah backend.
///
/// Implementors encapsulate transport and serialization details.  Consumers
/// (e.g. [`crate::application::CheckConnectionUseCase`]) stay decoupled from
/// any particular HTTP client library.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Send one user turn and return the backend's payload untouched,
    /// or a normalized [`ClientError`] on failure.
    async fn send_chat_message(&self, request: &ChatRequest) -> Result<ChatResponse, ClientError>;

    /// Probe the service root to confirm the backend is up.
    async fn health_check(&self) -> Result<Value, ClientError>;
}
