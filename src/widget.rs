//! The chat widget.
//!
//! [`ChatClient`] binds a [`MessageList`], an [`InputControl`] and a
//! [`ChatBackend`] together.  A submission echoes the user's text, clears the
//! input, shows a loading placeholder, sends one request and overwrites the
//! placeholder with the reply.
//!
//! Only one reply may be outstanding at a time.  While one is, further
//! submissions fail with [`Error::Busy`] and leave the list and the input
//! untouched, so placeholders always resolve in the order they were shown.
//! A submission that is dropped before its reply arrives (a cancelled
//! `submit` future or a discarded [`PendingReply`]) no longer holds the
//! client: its placeholder is marked failed the next time the client looks.

use std::sync::{Arc, Weak};

use crate::client::ChatBackend;
use crate::error::{Error, Result};
use crate::keys::{KeyAction, KeyEvent, key_action};
use crate::observability::{WIDGET_BUSY, WIDGET_FAILED, WIDGET_IGNORED, WIDGET_SUBMITS};
use crate::surface::{InputControl, MessageList};
use crate::types::{
    Author, ChatRequest, ChatResponse, LOADING_INDICATOR, MessageHandle, MessageState, SessionId,
};

/// Prefix of the text shown in a placeholder whose request failed.
pub const ERROR_PREFIX: &str = "[error]";

const ABANDONED: &str = "request abandoned";

/// Result of a submission that was not refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The text was empty after trimming; nothing happened.
    Ignored,

    /// The placeholder now shows this reply.
    Replied(String),
}

/// A submission whose placeholder is on screen and whose request has not
/// been answered yet.
///
/// Produced by [`ChatClient::begin`] and consumed by [`ChatClient::complete`].
#[derive(Debug)]
#[must_use = "dropping a pending reply abandons the submission"]
pub struct PendingReply {
    session: SessionId,
    request: ChatRequest,
    placeholder: MessageHandle,
    alive: Arc<()>,
}

impl PendingReply {
    /// The session the request belongs to.
    pub fn session(&self) -> SessionId {
        self.session
    }

    /// The request to send.
    pub fn request(&self) -> &ChatRequest {
        &self.request
    }

    /// The placeholder that will receive the reply.
    pub fn placeholder(&self) -> MessageHandle {
        self.placeholder
    }

    /// Send the request through `backend`.
    pub async fn send<B: ChatBackend + ?Sized>(&self, backend: &B) -> Result<ChatResponse> {
        backend.send(self.session, &self.request).await
    }
}

struct InFlight {
    placeholder: MessageHandle,
    alive: Weak<()>,
}

impl InFlight {
    fn is_abandoned(&self) -> bool {
        self.alive.strong_count() == 0
    }
}

/// A chat widget bound to its surface and its server.
pub struct ChatClient<B, L, I> {
    backend: B,
    session: SessionId,
    list: L,
    input: I,
    loading_indicator: String,
    in_flight: Option<InFlight>,
    // The most recently settled placeholder.
    settled: Option<(MessageHandle, MessageState)>,
}

impl<B: ChatBackend, L: MessageList, I: InputControl> ChatClient<B, L, I> {
    /// Creates a new client for `session`.
    pub fn new(backend: B, session: SessionId, list: L, input: I) -> Self {
        Self {
            backend,
            session,
            list,
            input,
            loading_indicator: LOADING_INDICATOR.to_string(),
            in_flight: None,
            settled: None,
        }
    }

    /// Sets the text shown while a reply is outstanding.
    pub fn with_loading_indicator(mut self, indicator: impl Into<String>) -> Self {
        self.loading_indicator = indicator.into();
        self
    }

    /// The session identifier sent with every request.
    pub fn session(&self) -> SessionId {
        self.session
    }

    /// The backend requests go through.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// The message surface.
    pub fn list(&self) -> &L {
        &self.list
    }

    /// The message surface, mutably.
    pub fn list_mut(&mut self) -> &mut L {
        &mut self.list
    }

    /// The input control.
    pub fn input(&self) -> &I {
        &self.input
    }

    /// The input control, mutably.
    pub fn input_mut(&mut self) -> &mut I {
        &mut self.input
    }

    /// The text shown while a reply is outstanding.
    pub fn loading_indicator(&self) -> &str {
        &self.loading_indicator
    }

    /// True while a reply is outstanding.
    pub fn is_busy(&self) -> bool {
        self.in_flight
            .as_ref()
            .is_some_and(|in_flight| !in_flight.is_abandoned())
    }

    /// The lifecycle state of `handle` if it is the outstanding placeholder or
    /// the one settled most recently.
    pub fn reply_state(&self, handle: MessageHandle) -> Option<MessageState> {
        match (&self.in_flight, self.settled) {
            (Some(in_flight), _) if in_flight.placeholder == handle => {
                if in_flight.is_abandoned() {
                    Some(MessageState::Failed)
                } else {
                    Some(MessageState::Pending)
                }
            }
            (_, Some((settled, state))) if settled == handle => Some(state),
            _ => None,
        }
    }

    /// Append a message to the list and return a handle to it.
    pub fn render_message(&mut self, text: &str, author: Author) -> MessageHandle {
        self.list.append(text, author)
    }

    /// Submit `text`: echo it, clear the input, show a placeholder, send one
    /// request and show the reply in the placeholder.
    ///
    /// Text that is empty after trimming is ignored without touching the
    /// list or the network.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Busy`] if a reply is already outstanding.  Any failure
    /// of the request is shown in the placeholder and returned.
    pub async fn submit(&mut self, text: &str) -> Result<SubmitOutcome> {
        let Some(pending) = self.begin(text)? else {
            return Ok(SubmitOutcome::Ignored);
        };
        let result = pending.send(&self.backend).await;
        self.complete(pending, result).map(SubmitOutcome::Replied)
    }

    /// Submit whatever the input control holds, as the send control does.
    pub async fn activate(&mut self) -> Result<SubmitOutcome> {
        let text = self.input.value();
        self.submit(&text).await
    }

    /// Deliver a key press to the input control.
    ///
    /// Returns `None` when the key should take its default effect; otherwise
    /// the default is suppressed and the submission's result is returned.
    pub async fn key_down(&mut self, event: KeyEvent) -> Option<Result<SubmitOutcome>> {
        match key_action(&event) {
            KeyAction::Submit => Some(self.activate().await),
            KeyAction::Default => None,
        }
    }

    /// Perform the synchronous first half of a submission.
    ///
    /// Returns `Ok(None)` for empty text.  Otherwise the user message and the
    /// placeholder are on screen, the input is cleared, and the returned
    /// [`PendingReply`] must be handed to [`ChatClient::complete`].
    pub fn begin(&mut self, text: &str) -> Result<Option<PendingReply>> {
        let text = text.trim();
        if text.is_empty() {
            WIDGET_IGNORED.click();
            return Ok(None);
        }
        self.release_abandoned();
        if self.in_flight.is_some() {
            WIDGET_BUSY.click();
            return Err(Error::busy());
        }
        WIDGET_SUBMITS.click();

        self.list.append(text, Author::User);
        self.input.set_value("");
        let placeholder = self.list.append(&self.loading_indicator, Author::Bot);
        let alive = Arc::new(());
        self.in_flight = Some(InFlight {
            placeholder,
            alive: Arc::downgrade(&alive),
        });

        Ok(Some(PendingReply {
            session: self.session,
            request: ChatRequest::new(text),
            placeholder,
            alive,
        }))
    }

    /// Perform the second half of a submission with the request's outcome.
    ///
    /// On success the placeholder shows the reply, which is also returned.
    /// On failure the placeholder shows an error line and the error is
    /// returned.  Either way the client stops being busy.
    pub fn complete(
        &mut self,
        pending: PendingReply,
        result: Result<ChatResponse>,
    ) -> Result<String> {
        match result {
            Ok(response) => {
                self.list.set_text(pending.placeholder, &response.response);
                self.settle(pending.placeholder, MessageState::Resolved);
                Ok(response.response)
            }
            Err(err) => {
                self.fail(pending.placeholder, &err.to_string());
                Err(err)
            }
        }
    }

    /// Give up on a submission without waiting for its reply.
    ///
    /// The placeholder is marked failed and the client stops being busy.
    pub fn abandon(&mut self, pending: PendingReply) {
        self.fail(pending.placeholder, ABANDONED);
    }

    /// Mark a submission whose [`PendingReply`] was dropped as failed.
    ///
    /// [`ChatClient::begin`] does this on its own; call it to update the
    /// surface as soon as a cancelled `submit` returns.  Returns true if
    /// there was such a submission.
    pub fn release_abandoned(&mut self) -> bool {
        match &self.in_flight {
            Some(in_flight) if in_flight.is_abandoned() => {
                let placeholder = in_flight.placeholder;
                self.fail(placeholder, ABANDONED);
                true
            }
            _ => false,
        }
    }

    fn fail(&mut self, placeholder: MessageHandle, reason: &str) {
        WIDGET_FAILED.click();
        self.list
            .set_failed(placeholder, &format!("{ERROR_PREFIX} {reason}"));
        self.settle(placeholder, MessageState::Failed);
    }

    fn settle(&mut self, placeholder: MessageHandle, state: MessageState) {
        if self
            .in_flight
            .as_ref()
            .is_some_and(|in_flight| in_flight.placeholder == placeholder)
        {
            self.in_flight = None;
        }
        self.settled = Some((placeholder, state));
    }
}
