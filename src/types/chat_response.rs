use serde::{Deserialize, Serialize};

/// Body returned by `POST /api/chat/{id}`.
///
/// Servers may include other fields; they are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    /// Text to display in place of the loading indicator.
    pub response: String,
}

impl ChatResponse {
    /// Create a new response.
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
        }
    }
}
