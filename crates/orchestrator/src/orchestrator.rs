//! # Tally Orchestrator
//!
//! This module coordinates a whole director tally run:
//! 1. Read the watch history out of the export archive
//! 2. Load the director cache
//! 3. Resolve every watched film and count films per director
//! 4. Persist the cache (loaded entries plus new lookups)
//! 5. Render the grouped report
//! 6. Write the report file
//!
//! Steps 4 and 6 only happen after step 3 finished for every film, so a
//! failed lookup leaves both files exactly as they were.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::info;

use history_loader::{archive, film_ids, Cache, CacheStore, DataLoadError, WatchedEntry};
use pipeline::{aggregate, render, DirectorLookup, Resolver};

use crate::config::TallyConfig;
use crate::error::{Result, TallyError};

/// What a successful run did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Watched films with an id, duplicates included
    pub films_processed: usize,
    /// Films resolved by lookup rather than from the cache
    pub films_fetched: usize,
    /// Entries in the cache file after the run
    pub cache_entries: usize,
    /// Distinct directors in the report
    pub directors: usize,
    pub cache_path: PathBuf,
    pub output_path: PathBuf,
}

/// Main orchestrator that wires the loader, resolver and report together
pub struct TallyOrchestrator<L> {
    config: TallyConfig,
    cache_store: CacheStore,
    resolver: Resolver<L>,
}

impl<L: DirectorLookup> TallyOrchestrator<L> {
    /// Create an orchestrator that resolves cache misses through `lookup`
    pub fn new(config: TallyConfig, lookup: L) -> Self {
        let cache_store = CacheStore::new(config.cache_path.clone());
        let resolver = Resolver::new(lookup).with_delay(config.request_delay);
        Self {
            config,
            cache_store,
            resolver,
        }
    }

    pub fn config(&self) -> &TallyConfig {
        &self.config
    }

    /// Read an export archive and run the tally over its watch history.
    ///
    /// Input problems come back as `TallyError::ArchiveNotFound` or
    /// `TallyError::InvalidArchive` before the cache is touched.
    pub fn process_archive(&self, archive_path: &Path) -> Result<RunSummary> {
        let history = self.load_history(archive_path)?;
        let cache = self.load_cache()?;
        self.run(&history, cache)
    }

    /// Parse the watch history out of the export archive
    pub fn load_history(&self, archive_path: &Path) -> Result<Vec<WatchedEntry>> {
        archive::load_watched_history(archive_path, &self.config.watched_member).map_err(
            |source| match source {
                DataLoadError::FileNotFound { .. } => TallyError::ArchiveNotFound {
                    path: archive_path.to_path_buf(),
                },
                source => TallyError::InvalidArchive {
                    path: archive_path.to_path_buf(),
                    source,
                },
            },
        )
    }

    /// Load the director cache snapshot for this run
    pub fn load_cache(&self) -> Result<Cache> {
        self.cache_store.load().map_err(|source| TallyError::Cache {
            path: self.config.cache_path.clone(),
            source,
        })
    }

    /// Run the tally over already-loaded history.
    ///
    /// `cache_snapshot` is never modified; it is the base the new lookups
    /// are merged onto when the cache file is rewritten.
    pub fn run(&self, history: &[WatchedEntry], cache_snapshot: Cache) -> Result<RunSummary> {
        let start_time = Instant::now();

        let ids = film_ids(history);
        info!(
            "{} watch-history rows, {} with a film id",
            history.len(),
            ids.len()
        );

        // A lookup failure returns here, before anything is written
        let aggregation = aggregate(&self.resolver, &ids, &cache_snapshot)?;

        let cache_entries = self
            .cache_store
            .persist(&cache_snapshot, &aggregation.additions)
            .map_err(|source| TallyError::Cache {
                path: self.config.cache_path.clone(),
                source,
            })?;

        let report = render(&aggregation.counts);
        fs::write(&self.config.output_path, report).map_err(|source| TallyError::Report {
            path: self.config.output_path.clone(),
            source,
        })?;
        info!(
            "Wrote output to file: '{}'",
            self.config.output_path.display()
        );

        info!("Tally finished in {:.2?}", start_time.elapsed());

        Ok(RunSummary {
            films_processed: ids.len(),
            films_fetched: aggregation.additions.len(),
            cache_entries,
            directors: aggregation.counts.len(),
            cache_path: self.config.cache_path.clone(),
            output_path: self.config.output_path.clone(),
        })
    }
}
