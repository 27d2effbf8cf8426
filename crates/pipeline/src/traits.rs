//! Core traits for the director pipeline.
//!
//! This module defines the DirectorLookup trait that lets the resolver
//! fall back to any source of director names on a cache miss.

use anyhow::Result;
use history_loader::DirectorString;

/// Source of director names for films missing from the cache.
///
/// The production implementation scrapes Letterboxd film pages; tests use
/// in-memory tables.
///
/// ## Design Note
/// - Calls are blocking: the resolver waits for each lookup before moving on
/// - Any `Err` is treated as fatal for the whole run
pub trait DirectorLookup {
    /// Returns the name of this lookup (for logging/debugging)
    fn name(&self) -> &str;

    /// Fetch the director string for one film.
    ///
    /// # Arguments
    /// * `film_id` - Letterboxd slug of the film
    ///
    /// # Returns
    /// * `Ok(DirectorString)` - Raw value, co-directors joined by `", "`
    /// * `Err` - If the value could not be found or fetched
    fn lookup(&self, film_id: &str) -> Result<DirectorString>;
}

impl<L: DirectorLookup + ?Sized> DirectorLookup for &L {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn lookup(&self, film_id: &str) -> Result<DirectorString> {
        (**self).lookup(film_id)
    }
}
