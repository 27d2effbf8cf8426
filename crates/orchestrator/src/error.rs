//! Errors surfaced by a tally run.
//!
//! Input errors (`ArchiveNotFound`, `InvalidArchive`) happen before the
//! director pass starts and leave no files behind. Everything else is fatal.

use std::path::PathBuf;

use history_loader::DataLoadError;
use pipeline::ResolveError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TallyError {
    /// The export archive does not exist
    #[error("Could not open file: '{}'", .path.display())]
    ArchiveNotFound { path: PathBuf },

    /// The export exists but is not a usable Letterboxd data file
    #[error("'{}' is not a valid Letterboxd data file", .path.display())]
    InvalidArchive {
        path: PathBuf,
        #[source]
        source: DataLoadError,
    },

    /// The director cache could not be read or written
    #[error("Director cache '{}' failed", .path.display())]
    Cache {
        path: PathBuf,
        #[source]
        source: DataLoadError,
    },

    /// A film's director could not be resolved; nothing was written
    #[error(transparent)]
    Resolution(#[from] ResolveError),

    /// The report file could not be written
    #[error("Failed to write report to '{}'", .path.display())]
    Report {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl TallyError {
    /// True for problems with the export the user pointed us at
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            TallyError::ArchiveNotFound { .. } | TallyError::InvalidArchive { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, TallyError>;
