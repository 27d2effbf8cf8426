//! Persistent director cache.
//!
//! The cache is a two-column CSV (`slug,director`) read once at the start of
//! a run and rewritten in full at the end. A missing file simply means an
//! empty cache.

use crate::error::{DataLoadError, Result};
use crate::parser;
use crate::types::Cache;
use std::fs::File;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{info, warn};

/// Default cache location, relative to the working directory
pub const DEFAULT_CACHE_FILE: &str = "cache.csv";

/// File-backed store for the film → director cache
#[derive(Debug, Clone)]
pub struct CacheStore {
    path: PathBuf,
}

impl CacheStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every persisted entry
    ///
    /// Returns an empty cache when the file does not exist yet.
    pub fn load(&self) -> Result<Cache> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                warn!(
                    "Cache file not found: '{}'. It will be created.",
                    self.path.display()
                );
                return Ok(Cache::new());
            }
            Err(e) => return Err(e.into()),
        };

        let cache = parser::parse_cache(file, &self.path.display().to_string())?;
        info!(
            "Read {} entries from cache file: '{}'",
            cache.len(),
            self.path.display()
        );
        Ok(cache)
    }

    /// Write `base ∪ additions` (additions win), replacing the file contents
    ///
    /// Rows go to a temporary file next to the cache which is then renamed
    /// over it, so a failed write leaves the previous cache untouched.
    /// Returns the number of entries written.
    pub fn persist(&self, base: &Cache, additions: &Cache) -> Result<usize> {
        let merged = Cache::merged(base, additions);
        let file_label = self.path.display().to_string();
        let csv_err = |source| DataLoadError::CsvError {
            file: file_label.clone(),
            source,
        };

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut tmp = NamedTempFile::new_in(dir)?;

        {
            let mut writer = csv::WriterBuilder::new()
                .has_headers(false)
                .from_writer(&mut tmp);

            for (film_id, directors) in merged.iter() {
                writer
                    .write_record([film_id.as_str(), directors.as_str()])
                    .map_err(csv_err)?;
            }
            writer.flush()?;
        }
        tmp.as_file().sync_all()?;

        // Dropping the PersistError removes the temporary file
        tmp.persist(&self.path)
            .map_err(|e| DataLoadError::IoError(e.error))?;

        info!(
            "Wrote {} entries to cache file: '{}'",
            merged.len(),
            self.path.display()
        );
        Ok(merged.len())
    }
}

impl Default for CacheStore {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_FILE)
    }
}
