// Public modules
pub mod chat;
pub mod client;
pub mod client_logger;
pub mod error;
pub mod keys;
pub mod observability;
pub mod render;
pub mod surface;
pub mod types;
pub mod widget;

// Re-exports
pub use client::{BASE_URL_ENV, ChatBackend, DEFAULT_BASE_URL, HttpChatBackend};
pub use client_logger::ChatLogger;
pub use error::{Error, Result};
pub use keys::{Key, KeyAction, KeyEvent, key_action};
pub use observability::register_biometrics;
pub use render::TerminalMessageList;
pub use surface::{InputControl, MessageList, MessageLog, TextInput};
pub use types::*;
pub use widget::{ChatClient, ERROR_PREFIX, PendingReply, SubmitOutcome};
