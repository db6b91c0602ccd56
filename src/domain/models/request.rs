use serde::Serialize;

use super::{Message, Mode};

/// Wire body for `POST /api/chat`, constructed fresh per call.
///
/// The backend's normalization rules live here rather than at call sites:
/// `session_id` is always a string (a missing conversation id becomes `""`),
/// `history` is always a sequence (possibly empty), and `mode` is omitted
/// entirely when unset so the backend auto-detects intent. The message itself
/// is not validated locally; rejecting empty input is the backend's call.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    message: String,
    session_id: String,
    history: Vec<Message>,
    #[serde(skip_serializing_if = "Option::is_none")]
    mode: Option<Mode>,
}

impl ChatRequest {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            session_id: String::new(),
            history: Vec::new(),
            mode: None,
        }
    }

    /// Attach the conversation id from a previous turn. `None` coalesces to
    /// the empty string: the wire field is always a string, never null.
    pub fn with_conversation_id(mut self, id: Option<String>) -> Self {
        self.session_id = id.unwrap_or_default();
        self
    }

    /// Supply prior turns, oldest first.
    pub fn with_history(mut self, history: Vec<Message>) -> Self {
        self.history = history;
        self
    }

    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = Some(mode);
        self
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn history(&self) -> &[Message] {
        &self.history
    }

    pub fn mode(&self) -> Option<Mode> {
        self.mode
    }

    /// An empty session id marks the start of a new conversation.
    pub fn is_session_start(&self) -> bool {
        self.session_id.is_empty()
    }
}
