use thiserror::Error;

/// Failures surfaced by the chat client.
///
/// Every variant displays as a human-readable message suitable for a UI.
/// The original transport error is logged by the adapter before
/// normalization; it never travels inside the value.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The backend answered with a non-2xx status.
    ///
    /// `message` prefers the response body's `detail` field, then its
    /// `message` field, then falls back to `Server error: <status>`.
    #[error("{message}")]
    Http { status: u16, message: String },

    /// The request went out but nothing came back: connection refused,
    /// timeout, or DNS failure.
    #[error("No response received from the server. Check that the backend is running and reachable.")]
    NoResponse,

    /// Any other local failure while building or sending the request.
    #[error("Failed to send the request. Please try again.")]
    Unknown,
}

impl ClientError {
    pub fn http(status: u16, message: impl Into<String>) -> Self {
        Self::Http {
            status,
            message: message.into(),
        }
    }

    pub fn is_http(&self) -> bool {
        matches!(self, Self::Http { .. })
    }

    pub fn is_no_response(&self) -> bool {
        matches!(self, Self::NoResponse)
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown)
    }

    /// The HTTP status code, when the backend actually responded.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}
