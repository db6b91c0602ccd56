use serde_json::Value;

use super::ChatReply;

/// The backend's chat payload, exactly as received.
///
/// The success shape is owned by the backend; the client performs no field
/// renaming, defaulting, or validation on it. Callers that want structure
/// opt into the tolerant [`ChatReply`] view via [`ChatResponse::reply`].
#[derive(Debug, Clone, PartialEq)]
pub struct ChatResponse(Value);

impl ChatResponse {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }

    /// The conversation id to thread into the next request, when the backend
    /// sent a non-empty one.
    pub fn session_id(&self) -> Option<&str> {
        self.0
            .get("session_id")
            .and_then(Value::as_str)
            .filter(|id| !id.is_empty())
    }

    /// Interpret the payload as the UI-facing reply view.
    pub fn reply(&self) -> ChatReply {
        ChatReply::from_value(&self.0)
    }
}

impl From<Value> for ChatResponse {
    fn from(value: Value) -> Self {
        Self(value)
    }
}
