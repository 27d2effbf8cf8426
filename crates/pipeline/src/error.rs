//! Error types for the pipeline crate.

use thiserror::Error;

/// A film whose director could not be resolved.
///
/// This is fatal for a run: counting on without the film would silently
/// under-report its directors.
#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("Could not resolve director for '{film_id}' via {lookup}: {reason}")]
    Unresolvable {
        film_id: String,
        lookup: String,
        reason: String,
    },
}
