//! Terminal rendering for the chat widget.
//!
//! [`TerminalMessageList`] is a [`MessageList`] that writes each message as a
//! labeled line.  When ANSI output is enabled and the message being updated
//! is still the last thing on screen, it is redrawn in place; otherwise the
//! updated text is written as a fresh line.

use std::io::{self, Stdout, Write};

use crate::surface::MessageList;
use crate::types::{Author, LOADING_INDICATOR, MessageHandle};

/// ANSI escape code for dim text (used for the loading indicator).
const ANSI_DIM: &str = "\x1b[2m";

/// ANSI escape code to reset all styling.
const ANSI_RESET: &str = "\x1b[0m";

/// ANSI escape code for cyan text (used for user labels).
const ANSI_CYAN: &str = "\x1b[36m";

/// ANSI escape code for green text (used for bot labels).
const ANSI_GREEN: &str = "\x1b[32m";

/// ANSI escape code for red text (used for errors).
const ANSI_RED: &str = "\x1b[31m";

/// ANSI escape code to move the cursor up one line.
const ANSI_UP: &str = "\x1b[1A";

/// ANSI escape code to erase from the cursor to the end of the screen.
const ANSI_ERASE_DOWN: &str = "\x1b[J";

/// A message list drawn on a terminal.
pub struct TerminalMessageList<W: Write + Send = Stdout> {
    out: W,
    use_color: bool,
    rewrite_in_place: bool,
    count: usize,
    // The last message written and how many lines it occupies.
    last: Option<(MessageHandle, usize)>,
}

impl TerminalMessageList<Stdout> {
    /// Creates a new list on stdout with ANSI colors enabled.
    pub fn new() -> Self {
        Self::with_writer(io::stdout(), true)
    }

    /// Creates a new list on stdout with specified color setting.
    pub fn with_color(use_color: bool) -> Self {
        Self::with_writer(io::stdout(), use_color)
    }
}

impl Default for TerminalMessageList<Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write + Send> TerminalMessageList<W> {
    /// Creates a new list writing to `out`.
    pub fn with_writer(out: W, use_color: bool) -> Self {
        Self {
            out,
            use_color,
            rewrite_in_place: use_color,
            count: 0,
            last: None,
        }
    }

    /// Controls in-place redraws.  They require ANSI output and are only
    /// correct when nothing else writes to the terminal between a message
    /// and its update.
    pub fn with_rewrite_in_place(mut self, enabled: bool) -> Self {
        self.rewrite_in_place = enabled && self.use_color;
        self
    }

    /// The underlying writer.
    pub fn get_ref(&self) -> &W {
        &self.out
    }

    /// Consumes the list and returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    /// Print an informational line outside the message list.
    pub fn print_info(&mut self, info: &str) {
        let _ = writeln!(self.out, "{info}");
        self.last = None;
        self.flush();
    }

    /// Print an error line outside the message list.
    pub fn print_error(&mut self, error: &str) {
        if self.use_color {
            let _ = writeln!(self.out, "{ANSI_RED}Error: {error}{ANSI_RESET}");
        } else {
            let _ = writeln!(self.out, "Error: {error}");
        }
        self.last = None;
        self.flush();
    }

    /// Erase the line above the cursor, e.g. the editor's echo of what was
    /// just typed.  Does nothing without ANSI output.
    pub fn erase_previous_line(&mut self) {
        if self.use_color {
            let _ = write!(self.out, "{ANSI_UP}\r{ANSI_ERASE_DOWN}");
            self.flush();
        }
    }

    fn flush(&mut self) {
        let _ = self.out.flush();
    }

    fn write_message(&mut self, text: &str, author: Author, failed: bool) -> usize {
        let label = match author {
            Author::User => "you",
            Author::Bot => "bot",
        };
        if self.use_color {
            let label_color = match author {
                Author::User => ANSI_CYAN,
                Author::Bot => ANSI_GREEN,
            };
            let body_style = if failed {
                ANSI_RED
            } else if author == Author::Bot && text == LOADING_INDICATOR {
                ANSI_DIM
            } else {
                ""
            };
            let _ = writeln!(
                self.out,
                "{label_color}{label}:{ANSI_RESET} {body_style}{text}{ANSI_RESET}"
            );
        } else {
            let _ = writeln!(self.out, "{label}: {text}");
        }
        self.flush();
        text.lines().count().max(1)
    }

    fn update(&mut self, handle: MessageHandle, text: &str, failed: bool) {
        if handle.index() >= self.count {
            return;
        }
        match self.last {
            Some((last, lines)) if last == handle && self.rewrite_in_place => {
                for _ in 0..lines {
                    let _ = write!(self.out, "{ANSI_UP}");
                }
                let _ = write!(self.out, "\r{ANSI_ERASE_DOWN}");
            }
            _ => {}
        }
        // Only placeholders are updated, and placeholders are always bot messages.
        let lines = self.write_message(text, Author::Bot, failed);
        self.last = Some((handle, lines));
    }
}

impl<W: Write + Send> MessageList for TerminalMessageList<W> {
    fn append(&mut self, text: &str, author: Author) -> MessageHandle {
        let handle = MessageHandle::new(self.count);
        self.count += 1;
        let lines = self.write_message(text, author, false);
        self.last = Some((handle, lines));
        handle
    }

    fn set_text(&mut self, handle: MessageHandle, text: &str) {
        self.update(handle, text, false);
    }

    fn set_failed(&mut self, handle: MessageHandle, text: &str) {
        self.update(handle, text, true);
    }
}
