use serde::{Deserialize, Serialize};

use crate::types::Author;

/// Text shown in a bot message while its reply is outstanding.
pub const LOADING_INDICATOR: &str = "...";

/// One entry in the message list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// The displayed text.
    pub text: String,

    /// Who wrote it.
    pub author: Author,
}

impl Message {
    /// Create a new message.
    pub fn new(text: impl Into<String>, author: Author) -> Self {
        Self {
            text: text.into(),
            author,
        }
    }

    /// Create a new user message.
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(text, Author::User)
    }

    /// Create a new bot message.
    pub fn bot(text: impl Into<String>) -> Self {
        Self::new(text, Author::Bot)
    }
}

/// Opaque reference to a message that has been appended to a list.
///
/// Handles are only meaningful to the list that issued them.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MessageHandle(usize);

impl MessageHandle {
    /// Wraps a list-specific index.
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// The list-specific index.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Lifecycle of a bot placeholder.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum MessageState {
    /// The loading indicator is shown.
    Pending,

    /// The server's reply is shown.
    Resolved,

    /// The request failed and an error line is shown.
    Failed,
}
