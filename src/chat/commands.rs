//! Slash command parsing for the chat application.
//!
//! Only the exact command words below are intercepted.  Anything else,
//! including unknown slash-prefixed text such as `/me waves`, is sent to the
//! server as an ordinary message.

/// A parsed chat command.
///
/// These commands control the terminal front end and are not sent to the
/// server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatCommand {
    /// Display help information.
    Help,

    /// Show the session identifier.
    Session,

    /// Exit the chat application.
    Quit,

    /// Report a parsing error back to the caller.
    Invalid(String),
}

/// Parses user input for slash commands.
///
/// Returns `Some(ChatCommand)` if the input is a command, or `None` if it
/// should be treated as a regular message.
///
/// # Examples
///
/// ```
/// # use rpchat::chat::parse_command;
/// assert!(parse_command("/quit").is_some());
/// assert!(parse_command("/me waves").is_none());
/// assert!(parse_command("Hello!").is_none());
/// ```
pub fn parse_command(input: &str) -> Option<ChatCommand> {
    let input = input.trim();
    let rest = input.strip_prefix('/')?;

    let mut parts = rest.splitn(2, ' ');
    let command = parts.next()?.to_lowercase();
    let argument = parts.next().map(|s| s.trim()).filter(|s| !s.is_empty());

    let parsed = match command.as_str() {
        "help" | "?" => ChatCommand::Help,
        "session" => ChatCommand::Session,
        "quit" | "exit" | "q" => ChatCommand::Quit,
        _ => return None,
    };
    match argument {
        Some(_) => Some(ChatCommand::Invalid(format!("/{command} takes no arguments"))),
        None => Some(parsed),
    }
}

/// Returns the help text for available commands.
pub fn help_text() -> &'static str {
    "Commands:
  /help, /?          Show this help
  /session           Show the session identifier
  /quit, /exit, /q   Exit

Anything else is sent to the server."
}
