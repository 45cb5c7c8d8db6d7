//! Terminal chat front end.
//!
//! This module provides the pieces the `rpchat` binary is assembled from:
//!
//! - [`config`]: CLI argument parsing and configuration
//! - [`commands`]: Slash command parsing and handling

mod commands;
mod config;

pub use crate::render::TerminalMessageList;
pub use commands::{ChatCommand, help_text, parse_command};
pub use config::{ChatArgs, ChatConfig};
