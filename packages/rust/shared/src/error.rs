//! Error types for CodeTutor.
//!
//! Library crates use [`TutorError`] via `thiserror`.
//! App crates (cli/tui) wrap this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all CodeTutor operations.
#[derive(Debug, thiserror::Error)]
pub enum TutorError {
    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Structurally invalid topic table (empty pattern list, duplicate id,
    /// malformed regex). Fatal at load time.
    #[error("topic table error: {message}")]
    Topics { message: String },

    /// Tokenizer loading or encoding error. Absorbed at the engine boundary;
    /// only surfaced as a startup warning.
    #[error("tokenizer error: {0}")]
    Tokenizer(String),

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, TutorError>;

impl TutorError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a topic-table error from any displayable message.
    pub fn topics(msg: impl Into<String>) -> Self {
        Self::Topics {
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_formatting() {
        let err = TutorError::config("missing model dir");
        assert_eq!(err.to_string(), "config error: missing model dir");

        let err = TutorError::topics("duplicate topic id 'fibonacci'");
        assert!(err.to_string().contains("duplicate topic id"));
    }
}
