// Public modules
pub mod author;
pub mod chat_request;
pub mod chat_response;
pub mod message;
pub mod session_id;

// Re-exports
pub use author::Author;
pub use chat_request::ChatRequest;
pub use chat_response::ChatResponse;
pub use message::{LOADING_INDICATOR, Message, MessageHandle, MessageState};
pub use session_id::{SESSION_ID_LIMIT, SessionId};
