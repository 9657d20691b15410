//! Error types for runconf

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for configuration and run-summary operations
///
/// None of the lenient entry points return these; they are logged as
/// warnings instead. The strict variants (`try_*`, such as
/// [`ConfigEntry::try_extract`]) hand them back to the caller.
///
/// [`ConfigEntry::try_extract`]: crate::config::ConfigEntry::try_extract
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Source-related errors
    #[error("Could not open {path}: {source}")]
    SourceOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not decompress config source {path}: {reason}")]
    Decompression { path: PathBuf, reason: String },

    /// Line-related errors
    #[error("Could not extract config value from line {line_number}: {line}")]
    MalformedLine { line_number: usize, line: String },

    #[error("Another entry is present after the config value in line {line_number}: {line}")]
    TrailingContent { line_number: usize, line: String },

    /// Entry-related errors
    #[error("Could not interpret entry \"{raw}\" as {target}")]
    NotNumeric { raw: String, target: &'static str },

    #[error("Problems while interpreting entry \"{raw}\" as {target}")]
    PrecisionLoss { raw: String, target: &'static str },

    #[error("String \"{raw}\" consists of more than 1 characters")]
    NotSingleChar { raw: String },

    /// Lookup errors
    #[error("{token} is not specified in config")]
    MissingToken { token: String },

    /// Run summary errors
    #[error("Could not write logfile {path}: {source}")]
    LogWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not query {what}: {reason}")]
    ProcessStat { what: &'static str, reason: String },

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConfigError {
    /// Create a new source open error
    pub fn source_open(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::SourceOpen {
            path: path.into(),
            source,
        }
    }

    /// Create a new missing token error
    pub fn missing_token(token: impl Into<String>) -> Self {
        Self::MissingToken {
            token: token.into(),
        }
    }

    /// Create a new process statistics error
    pub fn process_stat(what: &'static str, reason: impl ToString) -> Self {
        Self::ProcessStat {
            what,
            reason: reason.to_string(),
        }
    }

    /// Log this error as a warning on the diagnostic channel.
    ///
    /// `operation` names the call that recovered from the error.
    pub fn warn(&self, operation: &'static str) {
        tracing::warn!(operation, "{}", self);
    }
}

/// Result type alias for runconf operations
pub type Result<T> = std::result::Result<T, ConfigError>;
