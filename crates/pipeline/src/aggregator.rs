//! Tallying watched films per director.

use crate::error::ResolveError;
use crate::resolver::Resolver;
use crate::traits::DirectorLookup;
use history_loader::{Cache, DIRECTOR_SEPARATOR, FilmCounts, FilmId};
use tracing::info;

/// Result of one pass over the watch history
#[derive(Debug, Clone, Default)]
pub struct Aggregation {
    /// Films watched per director
    pub counts: FilmCounts,
    /// Films resolved by lookup during the pass, not yet persisted
    pub additions: Cache,
}

/// Add one watched film to every director named in `directors`.
///
/// Co-directors each get a full film; empty names are skipped, so an empty
/// string counts for nobody.
pub fn count_directors(counts: &mut FilmCounts, directors: &str) {
    directors
        .split(DIRECTOR_SEPARATOR)
        .filter(|name| !name.is_empty())
        .for_each(|name| counts.increment(name));
}

/// Resolve every film in order and count films per director.
///
/// The loaded `cache` is only read. Stops at the first film that cannot be
/// resolved.
pub fn aggregate<L: DirectorLookup>(
    resolver: &Resolver<L>,
    film_ids: &[FilmId],
    cache: &Cache,
) -> Result<Aggregation, ResolveError> {
    info!("Processing {} films...", film_ids.len());

    let mut aggregation = Aggregation::default();

    for film_id in film_ids {
        let directors = resolver.resolve(film_id, cache, &mut aggregation.additions)?;
        count_directors(&mut aggregation.counts, &directors);
    }

    info!(
        "Counted {} directors ({} films looked up)",
        aggregation.counts.len(),
        aggregation.additions.len()
    );
    Ok(aggregation)
}
