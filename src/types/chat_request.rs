use serde::{Deserialize, Serialize};

/// Body of `POST /api/chat/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    /// The trimmed user text.
    pub message: String,
}

impl ChatRequest {
    /// Create a new request.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
