//! Logging trait for chat client exchanges.
//!
//! This module provides the [`ChatLogger`] trait that allows users to capture
//! and log every request passing through an [`HttpChatBackend`].
//!
//! [`HttpChatBackend`]: crate::HttpChatBackend

use crate::Error;
use crate::types::{ChatRequest, ChatResponse, SessionId};

/// A trait for logging chat exchanges.
///
/// Implement this trait to record each request, and the reply or failure it
/// produced, without changing how the client behaves.
///
/// # Example
///
/// ```rust,ignore
/// use rpchat::{ChatLogger, ChatRequest, ChatResponse, Error, SessionId};
///
/// struct StderrLogger;
///
/// impl ChatLogger for StderrLogger {
///     fn log_request(&self, session: SessionId, request: &ChatRequest) {
///         eprintln!("[{session}] -> {}", request.message);
///     }
///
///     fn log_response(&self, session: SessionId, response: &ChatResponse) {
///         eprintln!("[{session}] <- {}", response.response);
///     }
///
///     fn log_error(&self, session: SessionId, error: &Error) {
///         eprintln!("[{session}] !! {error}");
///     }
/// }
/// ```
pub trait ChatLogger: Send + Sync {
    /// Log a request just before it is sent.
    fn log_request(&self, session: SessionId, request: &ChatRequest);

    /// Log a successfully parsed reply.
    fn log_response(&self, session: SessionId, response: &ChatResponse);

    /// Log a failed exchange.
    ///
    /// Called at most once per request, in place of `log_response`.
    fn log_error(&self, session: SessionId, error: &Error);
}
