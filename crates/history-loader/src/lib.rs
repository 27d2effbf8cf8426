//! # History Loader Crate
//!
//! This crate handles everything read from or written to disk around a
//! director tally run: the Letterboxd export archive and the director cache.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (FilmId, WatchedEntry, Cache, FilmCounts)
//! - **archive**: Open the export zip and extract `watched.csv`
//! - **parser**: Parse watch-history rows and cache rows
//! - **cache**: Load and persist the director cache
//! - **error**: Error types for loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use history_loader::{archive, CacheStore};
//! use std::path::Path;
//!
//! let history = archive::load_watched_history(Path::new("export.zip"), archive::WATCHED_MEMBER)?;
//! let store = CacheStore::new("cache.csv");
//! let cache = store.load()?;
//!
//! println!("{} rows, {} cached films", history.len(), cache.len());
//! ```

// Public modules
pub mod error;
pub mod types;
pub mod parser;
pub mod archive;
pub mod cache;

// Re-export commonly used types for convenience
pub use error::{DataLoadError, Result};
pub use cache::CacheStore;
pub use types::{
    // Type aliases
    FilmId,
    DirectorString,
    // Core types
    WatchedEntry,
    Cache,
    FilmCounts,
    // Helpers
    film_ids,
    DIRECTOR_SEPARATOR,
};
