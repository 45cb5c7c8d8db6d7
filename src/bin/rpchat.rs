//! Interactive terminal front end for an rp-pollinations chat server.
//!
//! Each line typed at the prompt is submitted the way the web widget submits
//! its text box on Enter: it is echoed, a `...` placeholder is shown, and the
//! placeholder is replaced by the server's reply.
//!
//! # Usage
//!
//! ```bash
//! # Talk to a server on localhost:8000
//! rpchat
//!
//! # Talk to another server
//! rpchat --base-url http://chat.example:8080
//!
//! # Disable colors and log each exchange to stderr
//! rpchat --no-color --verbose
//! ```
//!
//! # Commands
//!
//! - `/help` - Show available commands
//! - `/session` - Show the session identifier
//! - `/quit` - Exit the application

use std::sync::Arc;

use arrrg::CommandLine;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tokio::sync::Notify;

use rpchat::chat::{ChatArgs, ChatCommand, ChatConfig, help_text, parse_command};
use rpchat::{
    ChatClient, ChatLogger, ChatRequest, ChatResponse, Error, HttpChatBackend, InputControl,
    KeyEvent, SessionId, TerminalMessageList, TextInput,
};

/// Writes every exchange to stderr.
struct StderrLogger;

impl ChatLogger for StderrLogger {
    fn log_request(&self, session: SessionId, request: &ChatRequest) {
        eprintln!("[{session}] -> {:?}", request.message);
    }

    fn log_response(&self, session: SessionId, response: &ChatResponse) {
        eprintln!("[{session}] <- {:?}", response.response);
    }

    fn log_error(&self, session: SessionId, error: &Error) {
        eprintln!("[{session}] !! {error}");
    }
}

/// Main entry point for the rpchat application.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (args, _) = ChatArgs::from_command_line_relaxed("rpchat [OPTIONS]");
    let config = ChatConfig::from(args);

    let mut backend = HttpChatBackend::new(config.base_url.clone())?;
    if config.verbose {
        backend = backend.with_logger(Arc::new(StderrLogger));
    }
    // Log lines land between a placeholder and its reply, so redraws are off.
    let list = TerminalMessageList::with_color(config.use_color)
        .with_rewrite_in_place(!config.verbose);
    let mut client = ChatClient::new(backend, config.session_id, list, TextInput::new())
        .with_loading_indicator(config.loading_indicator.clone());
    let mut rl = DefaultEditor::new()?;

    // Ctrl+C while waiting on the server exits; there is no cancellation.
    let interrupted = Arc::new(Notify::new());
    let interrupted_clone = interrupted.clone();
    ctrlc::set_handler(move || {
        interrupted_clone.notify_one();
    })?;

    println!(
        "rpchat (server: {}, session: {})",
        client.backend().base_url(),
        client.session()
    );
    println!("Type /help for commands, /quit to exit\n");

    loop {
        let readline = rl.readline("> ");

        match readline {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }

                let _ = rl.add_history_entry(line.as_str());

                if let Some(cmd) = parse_command(&line) {
                    match cmd {
                        ChatCommand::Quit => {
                            println!("Goodbye!");
                            break;
                        }
                        ChatCommand::Help => {
                            for line in help_text().lines() {
                                println!("    {}", line);
                            }
                        }
                        ChatCommand::Session => {
                            let session = client.session();
                            client.list_mut().print_info(&format!("Session: {session}"));
                        }
                        ChatCommand::Invalid(message) => {
                            client.list_mut().print_error(&message);
                        }
                    }
                    continue;
                }

                // The message list echoes the text itself.
                client.list_mut().erase_previous_line();
                client.input_mut().set_value(&line);

                let outcome = tokio::select! {
                    outcome = client.key_down(KeyEvent::enter()) => outcome,
                    _ = interrupted.notified() => {
                        println!("\n[interrupted]");
                        break;
                    }
                };
                if let Some(Err(err)) = outcome {
                    // Request failures are already shown in place of the reply.
                    if err.is_busy() {
                        client.list_mut().print_error(&err.to_string());
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                // Ctrl+C at prompt - soft interrupt
                println!();
                continue;
            }
            Err(ReadlineError::Eof) => {
                // Ctrl+D - exit
                println!("\nGoodbye!");
                break;
            }
            Err(err) => {
                client
                    .list_mut()
                    .print_error(&format!("Input error: {}", err));
                break;
            }
        }
    }

    Ok(())
}
