// ── Central error type ────────────────────────────────────────────────────────
//
// All fallible operations in Plume return `error::Result<T>`.  No panics
// in production paths; user-facing errors surface through
// `Prompter::notify_error`, background errors through `tracing`.

use std::path::PathBuf;

use thiserror::Error;

/// Every error that Plume can produce.
#[derive(Debug, Error)]
pub enum PlumeError {
    /// A file could not be read or written.
    #[error("{}: {source}", .path.display())]
    Io {
        /// The file the operation was aimed at.
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Font size input that is not an integer in the accepted range.
    #[error("invalid font size {input:?}")]
    InvalidFontSize { input: String },

    /// A font family that is not in the configured family list.
    #[error("unknown font family {family:?}")]
    UnknownFont { family: String },

    /// The settings file exists but could not be (de)serialised.
    #[error("settings: {0}")]
    Settings(#[from] serde_json::Error),

    /// A console line starting with `:` that names no known command.
    #[error("unknown command {line:?}")]
    UnknownCommand { line: String },
}

impl PlumeError {
    /// Attach the offending path to a raw I/O error.
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, PlumeError>;
