//! Tiny Config - Pure configuration data structures
//!
//! This crate contains only data structures, no logic or global state.
//! It is the shared configuration vocabulary of the Tiny crates.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

/// Processing phase, used to pick log targets
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Line sources (buffers, files, stdin)
    Source,
    /// Token recognition
    Lexer,
    /// Command line driver
    Cli,
}

impl Phase {
    /// Get the string name of the phase
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Source => "source",
            Phase::Lexer => "lexer",
            Phase::Cli => "cli",
        }
    }

    /// Get the log target name for this phase
    pub fn target(&self) -> String {
        format!("tiny::{}", self.as_str())
    }
}

/// How a token stream is rendered by the driver
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DumpFormat {
    /// One lexeme per line
    #[default]
    Text,
    /// A JSON array of lexemes
    Json,
}

impl fmt::Display for DumpFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DumpFormat::Text => write!(f, "text"),
            DumpFormat::Json => write!(f, "json"),
        }
    }
}

impl FromStr for DumpFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(DumpFormat::Text),
            "json" => Ok(DumpFormat::Json),
            other => Err(format!("unknown dump format '{other}' (expected text or json)")),
        }
    }
}

/// Contents of a `tiny.json` project file
///
/// Every field is optional; command line flags take precedence.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    /// Source file to lex, relative to the project file
    pub entry: Option<String>,
    /// Output format
    pub format: Option<DumpFormat>,
    /// Global log level: "trace", "debug", "info", "warn", "error"
    pub log_level: Option<String>,
    /// Log level override for the lexer phase
    pub lexer_log_level: Option<String>,
    /// Whether locations are printed next to tokens
    pub show_location: Option<bool>,
}
