//! Capabilities the chat widget needs from the surrounding page.
//!
//! The widget never builds or styles its surface.  It is handed something
//! that can show messages and something that holds the text being typed,
//! and talks to both through the traits below.

use crate::types::{Author, Message, MessageHandle};

/// An ordered, append-only list of displayed messages.
///
/// Implementations keep the most recently appended message in view.
pub trait MessageList: Send {
    /// Append a message labeled by `author` and return a handle to it.
    fn append(&mut self, text: &str, author: Author) -> MessageHandle;

    /// Replace the displayed text of a previously appended message.
    ///
    /// Handles this list did not issue are ignored.
    fn set_text(&mut self, handle: MessageHandle, text: &str);

    /// Replace the displayed text of a message whose request failed.
    ///
    /// Surfaces that style failures differently override this.
    fn set_failed(&mut self, handle: MessageHandle, text: &str) {
        self.set_text(handle, text);
    }
}

/// The control the user types into.
pub trait InputControl: Send {
    /// The current contents.
    fn value(&self) -> String;

    /// Replace the contents.
    fn set_value(&mut self, value: &str);
}

/// An in-memory message list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageLog {
    messages: Vec<Message>,
    in_view: Option<MessageHandle>,
}

impl MessageLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// All messages, oldest first.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// The message behind `handle`, if this log issued it.
    pub fn get(&self, handle: MessageHandle) -> Option<&Message> {
        self.messages.get(handle.index())
    }

    /// The newest message.
    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Number of messages.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// True when nothing has been appended.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// The message currently scrolled into view.
    pub fn in_view(&self) -> Option<MessageHandle> {
        self.in_view
    }
}

impl MessageList for MessageLog {
    fn append(&mut self, text: &str, author: Author) -> MessageHandle {
        let handle = MessageHandle::new(self.messages.len());
        self.messages.push(Message::new(text, author));
        self.in_view = Some(handle);
        handle
    }

    fn set_text(&mut self, handle: MessageHandle, text: &str) {
        if let Some(message) = self.messages.get_mut(handle.index()) {
            message.text = text.to_string();
        }
    }
}

/// An in-memory text input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    value: String,
}

impl TextInput {
    /// Creates an empty input.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an input holding `value`.
    pub fn with_value(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }
}

impl InputControl for TextInput {
    fn value(&self) -> String {
        self.value.clone()
    }

    fn set_value(&mut self, value: &str) {
        self.value = value.to_string();
    }
}
