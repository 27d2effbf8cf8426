//! Core domain types for watch-history processing.
//!
//! This module defines the data that flows between the loader, the
//! resolver and the report:
//! - Type aliases for domain clarity (FilmId, DirectorString)
//! - `WatchedEntry`, one row of the watch history
//! - `Cache`, the film → director mapping persisted between runs
//! - `FilmCounts`, films watched per director

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

// =============================================================================
// Type Aliases
// =============================================================================

/// Letterboxd slug identifying a film, e.g. `the-thing`
pub type FilmId = String;

/// Raw director value for a film; co-directors are joined by `", "`
pub type DirectorString = String;

/// Separator between co-directors inside a `DirectorString`
pub const DIRECTOR_SEPARATOR: &str = ", ";

// =============================================================================
// Watch History
// =============================================================================

/// One row of `watched.csv`.
///
/// `film_id` is `None` when the row has an empty URL column; such rows
/// contribute nothing to the tally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatchedEntry {
    /// 1-based line number in the source CSV (the header is line 1)
    pub line: usize,
    pub film_id: Option<FilmId>,
}

/// Film ids in watch-history order, skipping rows without one
pub fn film_ids(entries: &[WatchedEntry]) -> Vec<FilmId> {
    entries
        .iter()
        .filter_map(|entry| entry.film_id.clone())
        .collect()
}

// =============================================================================
// Director Cache
// =============================================================================

/// Mapping from film id to its resolved director string.
///
/// Backed by a `BTreeMap` so iteration (and therefore the persisted file)
/// is ordered by film id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cache {
    entries: BTreeMap<FilmId, DirectorString>,
}

impl Cache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, film_id: &str) -> Option<&DirectorString> {
        self.entries.get(film_id)
    }

    pub fn contains(&self, film_id: &str) -> bool {
        self.entries.contains_key(film_id)
    }

    /// Insert an entry, replacing any previous value for the same film
    pub fn insert(&mut self, film_id: impl Into<FilmId>, directors: impl Into<DirectorString>) {
        self.entries.insert(film_id.into(), directors.into());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&FilmId, &DirectorString)> {
        self.entries.iter()
    }

    /// Union of `base` and `additions`; entries in `additions` win.
    ///
    /// Neither input is modified.
    pub fn merged(base: &Cache, additions: &Cache) -> Cache {
        let mut entries = base.entries.clone();
        entries.extend(
            additions
                .entries
                .iter()
                .map(|(id, directors)| (id.clone(), directors.clone())),
        );
        Cache { entries }
    }
}

impl FromIterator<(FilmId, DirectorString)> for Cache {
    fn from_iter<I: IntoIterator<Item = (FilmId, DirectorString)>>(iter: I) -> Self {
        Cache {
            entries: iter.into_iter().collect(),
        }
    }
}

// =============================================================================
// Film Counts
// =============================================================================

/// Number of watched films per director.
///
/// Directors are remembered in the order they were first counted; the
/// report relies on that order when two names tie on count and surname
/// initial. Equality ignores that order and compares the counts only.
#[derive(Debug, Clone, Default)]
pub struct FilmCounts {
    order: Vec<String>,
    counts: HashMap<String, u32>,
}

impl FilmCounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one film to `director`, starting from 0 if unseen
    pub fn increment(&mut self, director: &str) {
        match self.counts.get_mut(director) {
            Some(count) => *count += 1,
            None => {
                self.order.push(director.to_string());
                self.counts.insert(director.to_string(), 1);
            }
        }
    }

    /// Count for `director`, 0 if never counted
    pub fn get(&self, director: &str) -> u32 {
        self.counts.get(director).copied().unwrap_or(0)
    }

    /// Number of distinct directors
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Directors with their counts, in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> + '_ {
        self.order
            .iter()
            .map(|name| (name.as_str(), self.counts[name.as_str()]))
    }
}

/// Equal when every director has the same count; first-seen order is ignored.
///
/// Two equal values may still render different reports, since directors
/// sharing a count and surname initial are listed in first-seen order.
impl PartialEq for FilmCounts {
    fn eq(&self, other: &Self) -> bool {
        self.counts == other.counts
    }
}

impl Eq for FilmCounts {}

/// Build counts from `(director, count)` pairs; zero counts are dropped
/// and repeated names are summed.
impl<S: AsRef<str>> FromIterator<(S, u32)> for FilmCounts {
    fn from_iter<I: IntoIterator<Item = (S, u32)>>(iter: I) -> Self {
        let mut counts = FilmCounts::new();
        for (director, count) in iter {
            for _ in 0..count {
                counts.increment(director.as_ref());
            }
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_additions_win() {
        let base: Cache = [
            ("alien".to_string(), "Ridley Scott".to_string()),
            ("heat".to_string(), "Old Value".to_string()),
        ]
        .into_iter()
        .collect();
        let additions: Cache = [
            ("heat".to_string(), "Michael Mann".to_string()),
            ("ran".to_string(), "Akira Kurosawa".to_string()),
        ]
        .into_iter()
        .collect();

        let merged = Cache::merged(&base, &additions);

        assert_eq!(merged.len(), 3);
        assert_eq!(merged.get("alien").unwrap(), "Ridley Scott");
        assert_eq!(merged.get("heat").unwrap(), "Michael Mann");
        assert_eq!(merged.get("ran").unwrap(), "Akira Kurosawa");
        // Inputs are left alone
        assert_eq!(base.get("heat").unwrap(), "Old Value");
        assert_eq!(additions.len(), 2);
    }

    #[test]
    fn test_counts_first_seen_order() {
        let mut counts = FilmCounts::new();
        counts.increment("Wright");
        counts.increment("Park");
        counts.increment("Wright");

        let seen: Vec<_> = counts.iter().collect();
        assert_eq!(seen, vec![("Wright", 2), ("Park", 1)]);
        assert_eq!(counts.get("Nobody"), 0);
    }

    #[test]
    fn test_counts_equality_ignores_order() {
        let a: FilmCounts = [("X", 2), ("Y", 1)].into_iter().collect();
        let b: FilmCounts = [("Y", 1), ("X", 2)].into_iter().collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_film_ids_skip_missing() {
        let entries = vec![
            WatchedEntry { line: 2, film_id: Some("a".to_string()) },
            WatchedEntry { line: 3, film_id: None },
            WatchedEntry { line: 4, film_id: Some("b".to_string()) },
        ];
        assert_eq!(film_ids(&entries), vec!["a".to_string(), "b".to_string()]);
    }
}
