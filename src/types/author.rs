use std::fmt;

use serde::{Deserialize, Serialize};

/// Who wrote a message.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Author {
    /// Text typed by the person at the keyboard.
    User,

    /// Text produced by the chat server.
    Bot,
}

impl Author {
    /// The label a surface uses to style the message.
    pub fn as_str(&self) -> &'static str {
        match self {
            Author::User => "user",
            Author::Bot => "bot",
        }
    }
}

impl fmt::Display for Author {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels() {
        assert_eq!(Author::User.to_string(), "user");
        assert_eq!(Author::Bot.to_string(), "bot");
    }

    #[test]
    fn serde_lowercase() {
        assert_eq!(serde_json::to_string(&Author::Bot).unwrap(), "\"bot\"");
        let author: Author = serde_json::from_str("\"user\"").unwrap();
        assert_eq!(author, Author::User);
    }
}
