use std::fmt;

use crate::core::constants::exit_codes;

/// Error types for tauri-bridge operations
#[derive(Debug)]
pub enum BridgeError {
    /// IO error (file operations, etc.)
    Io(std::io::Error),

    /// Configuration error
    Config(String),

    /// Regex compilation error
    Regex(regex::Error),

    /// TOML parsing error
    TomlParsing(toml::de::Error),

    /// JSON encoding error
    Json(serde_json::Error),

    /// Dev server bound to something other than a host/port pair
    UnexpectedAddress(String),

    /// The packaging CLI could not be started
    Launch(String),

    /// The packaging CLI exited unsuccessfully
    CliFailed(Option<i32>),
}

impl BridgeError {
    /// Process exit code the binary reports for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            BridgeError::CliFailed(Some(code)) if *code != 0 => *code,
            _ => exit_codes::FAILURE,
        }
    }
}

impl fmt::Display for BridgeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BridgeError::Io(err) => write!(f, "IO error: {err}"),
            BridgeError::Config(msg) => write!(f, "Configuration error: {msg}"),
            BridgeError::Regex(err) => write!(f, "Regex error: {err}"),
            BridgeError::TomlParsing(err) => write!(f, "TOML parsing error: {err}"),
            BridgeError::Json(err) => write!(f, "JSON error: {err}"),
            BridgeError::UnexpectedAddress(addr) => {
                write!(f, "Unexpected dev server address: {addr}")
            }
            BridgeError::Launch(msg) => write!(f, "Could not launch packaging CLI: {msg}"),
            BridgeError::CliFailed(Some(code)) => {
                write!(f, "Packaging CLI exited with status {code}")
            }
            BridgeError::CliFailed(None) => write!(f, "Packaging CLI was terminated by a signal"),
        }
    }
}

impl std::error::Error for BridgeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BridgeError::Io(err) => Some(err),
            BridgeError::Regex(err) => Some(err),
            BridgeError::TomlParsing(err) => Some(err),
            BridgeError::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for BridgeError {
    fn from(err: std::io::Error) -> Self {
        BridgeError::Io(err)
    }
}

impl From<regex::Error> for BridgeError {
    fn from(err: regex::Error) -> Self {
        BridgeError::Regex(err)
    }
}

impl From<toml::de::Error> for BridgeError {
    fn from(err: toml::de::Error) -> Self {
        BridgeError::TomlParsing(err)
    }
}

impl From<serde_json::Error> for BridgeError {
    fn from(err: serde_json::Error) -> Self {
        BridgeError::Json(err)
    }
}

/// Type alias for Results using BridgeError
pub type Result<T> = std::result::Result<T, BridgeError>;
