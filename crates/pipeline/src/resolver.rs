//! Cache-first director resolution.
//!
//! The resolver never writes to the cache it was given. Films it has to
//! look up are recorded in a separate `additions` cache, which the caller
//! merges into the persisted cache once the pass is over.

use crate::error::ResolveError;
use crate::traits::DirectorLookup;
use history_loader::{Cache, DirectorString};
use std::thread;
use std::time::Duration;
use tracing::{error, info};

/// Delay after every lookup, to keep the request rate polite
pub const DEFAULT_REQUEST_DELAY: Duration = Duration::from_millis(500);

/// Resolves film ids to director strings.
///
/// ## Algorithm
/// 1. Cached films are answered from `cache` with no lookup and no delay
/// 2. Films already looked up during this pass are answered from `additions`
/// 3. Anything else goes to the lookup, is stored in `additions`, and is
///    followed by a blocking sleep of `delay`
pub struct Resolver<L> {
    lookup: L,
    delay: Duration,
}

impl<L: DirectorLookup> Resolver<L> {
    /// Create a resolver with the default request delay
    pub fn new(lookup: L) -> Self {
        Self {
            lookup,
            delay: DEFAULT_REQUEST_DELAY,
        }
    }

    /// Override the post-lookup delay (builder pattern)
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn lookup(&self) -> &L {
        &self.lookup
    }

    /// Resolve one film.
    ///
    /// # Returns
    /// * `Ok(DirectorString)` - The cached or freshly fetched value
    /// * `Err(ResolveError)` - The lookup failed; the run must stop
    pub fn resolve(
        &self,
        film_id: &str,
        cache: &Cache,
        additions: &mut Cache,
    ) -> Result<DirectorString, ResolveError> {
        if let Some(directors) = cache.get(film_id).or_else(|| additions.get(film_id)) {
            info!("Cached director for '{}': {}", film_id, directors);
            return Ok(directors.clone());
        }

        let directors = self.lookup.lookup(film_id).map_err(|e| {
            error!("Fetching director for '{}'... FAILED", film_id);
            ResolveError::Unresolvable {
                film_id: film_id.to_string(),
                lookup: self.lookup.name().to_string(),
                reason: format!("{:#}", e),
            }
        })?;
        info!("Fetching director for '{}'... OK: {}", film_id, directors);

        additions.insert(film_id, directors.clone());

        if !self.delay.is_zero() {
            thread::sleep(self.delay);
        }

        Ok(directors)
    }
}
