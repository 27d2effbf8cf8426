//! Error types for the history-loader crate.
//!
//! Every failure that can happen before the director pass starts lives
//! here: the export archive, the watch-history rows inside it, and the
//! on-disk director cache.

use thiserror::Error;

/// Errors that can occur while reading an export or the director cache
///
/// Rust concept: the `#[derive(Error)]` macro from thiserror implements
/// `std::error::Error` and `Display` from the `#[error(...)]` attributes
#[derive(Error, Debug)]
pub enum DataLoadError {
    /// File could not be found or opened
    #[error("Failed to open file: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading or writing a file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// The export is not a readable zip container
    #[error("Invalid archive {path}: {reason}")]
    InvalidArchive { path: String, reason: String },

    /// The archive opened fine but the expected member is absent
    #[error("Archive {path} has no member named {member}")]
    MissingMember { path: String, member: String },

    /// Malformed CSV (bad quoting, invalid UTF-8, ...)
    #[error("CSV error in {file}: {source}")]
    CsvError {
        file: String,
        #[source]
        source: csv::Error,
    },

    /// Line in a data file couldn't be parsed
    ///
    /// This variant stores context about where the error occurred
    #[error("Parse error at line {line} in {file}: {reason}")]
    ParseError {
        file: String,
        line: usize,
        reason: String,
    },

    /// Expected number of fields in a line doesn't match actual
    #[error("Expected {expected} fields but found {found} in line {line}")]
    FieldCountMismatch {
        expected: usize,
        found: usize,
        line: usize,
    },
}

impl DataLoadError {
    /// True when the error means the export itself is unusable, as opposed
    /// to the local cache being unreadable.
    pub fn is_invalid_export(&self) -> bool {
        matches!(
            self,
            DataLoadError::InvalidArchive { .. } | DataLoadError::MissingMember { .. }
        )
    }
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, DataLoadError>;
