//! Configuration types for the chat application.
//!
//! This module provides CLI argument parsing via `arrrg` and configuration
//! structures for controlling chat behavior.

use arrrg_derive::CommandLine;

use crate::types::{LOADING_INDICATOR, SessionId};

/// Command-line arguments for the rpchat tool.
#[derive(CommandLine, Debug, Default, PartialEq, Eq)]
pub struct ChatArgs {
    /// Server origin hosting `/api/chat/{id}`.
    #[arrrg(optional, "Server URL (default: $RPCHAT_BASE_URL or http://localhost:8000/)", "URL")]
    pub base_url: Option<String>,

    /// Text shown while a reply is outstanding.
    #[arrrg(optional, "Loading indicator (default: ...)", "TEXT")]
    pub loading: Option<String>,

    /// Disable ANSI colors and styles.
    #[arrrg(flag, "Disable ANSI colors/styles")]
    pub no_color: bool,

    /// Log every exchange to stderr.
    #[arrrg(flag, "Log requests and replies to stderr")]
    pub verbose: bool,
}

/// Configuration for a chat client.
///
/// This struct holds the resolved configuration values after processing
/// command-line arguments with appropriate defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatConfig {
    /// Server origin; `None` defers to the environment and then the default.
    pub base_url: Option<String>,

    /// Text shown while a reply is outstanding.
    pub loading_indicator: String,

    /// Whether to use ANSI colors and styles in output.
    pub use_color: bool,

    /// Whether to log every exchange to stderr.
    pub verbose: bool,

    /// The session identifier.  Sampled once, when the config is created.
    pub session_id: SessionId,
}

impl ChatConfig {
    /// Creates a new ChatConfig with default values and a fresh session id.
    ///
    /// Defaults:
    /// - Base URL: from the environment, else `http://localhost:8000/`
    /// - Loading indicator: `...`
    /// - Color: enabled
    /// - Verbose: disabled
    pub fn new() -> Self {
        Self {
            base_url: None,
            loading_indicator: LOADING_INDICATOR.to_string(),
            use_color: true,
            verbose: false,
            session_id: SessionId::generate(),
        }
    }

    /// Sets the server origin.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Sets the loading indicator.
    pub fn with_loading_indicator(mut self, indicator: impl Into<String>) -> Self {
        self.loading_indicator = indicator.into();
        self
    }

    /// Disables ANSI color output.
    pub fn without_color(mut self) -> Self {
        self.use_color = false;
        self
    }

    /// Enables logging of every exchange.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Pins the session identifier.
    pub fn with_session_id(mut self, session_id: SessionId) -> Self {
        self.session_id = session_id;
        self
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl From<ChatArgs> for ChatConfig {
    fn from(args: ChatArgs) -> Self {
        let config = ChatConfig {
            base_url: args.base_url,
            use_color: !args.no_color,
            verbose: args.verbose,
            ..ChatConfig::new()
        };
        match args.loading {
            Some(loading) if !loading.is_empty() => config.with_loading_indicator(loading),
            _ => config,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = ChatConfig::new();
        assert!(config.base_url.is_none());
        assert_eq!(config.loading_indicator, "...");
        assert!(config.use_color);
        assert!(!config.verbose);
    }

    #[test]
    fn session_id_is_fixed_per_config() {
        let config = ChatConfig::new();
        let copy = config.clone();
        assert_eq!(config.session_id, copy.session_id);
    }

    #[test]
    fn config_from_args_defaults() {
        let args = ChatArgs::default();
        let config = ChatConfig::from(args);
        assert!(config.base_url.is_none());
        assert_eq!(config.loading_indicator, "...");
        assert!(config.use_color);
        assert!(!config.verbose);
    }

    #[test]
    fn config_from_args_custom() {
        let args = ChatArgs {
            base_url: Some("http://chat.example:8080".to_string()),
            loading: Some("thinking".to_string()),
            no_color: true,
            verbose: true,
        };
        let config = ChatConfig::from(args);
        assert_eq!(config.base_url.as_deref(), Some("http://chat.example:8080"));
        assert_eq!(config.loading_indicator, "thinking");
        assert!(!config.use_color);
        assert!(config.verbose);
    }

    #[test]
    fn empty_loading_falls_back() {
        let args = ChatArgs {
            loading: Some(String::new()),
            ..ChatArgs::default()
        };
        assert_eq!(ChatConfig::from(args).loading_indicator, "...");
    }

    #[test]
    fn config_builder_pattern() {
        let config = ChatConfig::new()
            .with_base_url("http://127.0.0.1:1234")
            .with_loading_indicator("…")
            .without_color()
            .with_verbose(true)
            .with_session_id(SessionId::new(5));
        assert_eq!(config.base_url.as_deref(), Some("http://127.0.0.1:1234"));
        assert_eq!(config.loading_indicator, "…");
        assert!(!config.use_color);
        assert!(config.verbose);
        assert_eq!(config.session_id, SessionId::new(5));
    }
}
