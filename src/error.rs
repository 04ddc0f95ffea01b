//! Error types for maillog
//!
//! Defines an error enum covering all failure modes across the system.
//! Uses thiserror for ergonomic error handling.
//!
//! The parser itself never raises user-facing errors: malformed lines are
//! data-level skips. Only the input and export collaborators can fail the
//! process, and each failure class maps to a distinct exit code.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for maillog operations
pub type Result<T> = std::result::Result<T, MaillogError>;

/// Error type for maillog operations
#[derive(Error, Debug)]
pub enum MaillogError {
    /// No input given and stdin is a terminal
    #[error("an input file or directory is required when nothing is piped in")]
    MissingInput,

    /// The input path could not be inspected at all
    #[error("invalid input path {path}: {source}")]
    InvalidPath { path: PathBuf, source: io::Error },

    /// A file or directory could not be opened or read
    #[error("failed to read {path}: {source}")]
    Read { path: PathBuf, source: io::Error },

    /// Piped stdin could not be read to the end
    #[error("failed to parse piped input: {0}")]
    Pipe(#[source] io::Error),

    /// The output file could not be created
    #[error("failed to create output file {path}: {source}")]
    CreateOutput { path: PathBuf, source: io::Error },

    /// JSON serialization/write errors
    #[error("JSON export failed: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV serialization/write errors
    #[error("CSV export failed: {0}")]
    Csv(#[from] csv::Error),

    /// A plain write to the export destination failed
    #[error("export failed: {0}")]
    ExportIo(#[source] io::Error),

    /// I/O errors outside the classes above
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Other errors
    #[error("{0}")]
    Other(String),
}

impl MaillogError {
    /// Process exit code for this error
    ///
    /// Each failure class gets its own code so callers scripting around the
    /// binary can tell them apart: 127 missing input, 126 bad input path,
    /// 125 output creation, 2 export, 1 everything else.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::MissingInput => 127,
            Self::InvalidPath { .. } => 126,
            Self::CreateOutput { .. } => 125,
            Self::Json(_) | Self::Csv(_) | Self::ExportIo(_) => 2,
            Self::Read { .. } | Self::Pipe(_) | Self::Io(_) | Self::Other(_) => 1,
        }
    }
}
