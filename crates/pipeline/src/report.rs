//! Grouped text report of films watched per director.
//!
//! ## Format
//! One block per distinct count, highest count first:
//!
//! ```text
//! 3 films (2 directors):
//! Chan-wook Park
//! Edgar Wright
//!
//! 1 film (1 director):
//! Agnès Varda
//!
//! ```
//!
//! Inside a block directors are ordered by the first character of their
//! surname (last whitespace-separated token). Names sharing that character
//! keep the order in which they were first counted.

use history_loader::FilmCounts;
use std::fmt;

/// Directors that share the same film count
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportGroup {
    pub count: u32,
    pub directors: Vec<String>,
}

impl ReportGroup {
    /// "film" or "films" for this group's count
    pub fn film_noun(&self) -> &'static str {
        if self.count > 1 { "films" } else { "film" }
    }

    /// "director" or "directors" for this group's size
    pub fn director_noun(&self) -> &'static str {
        if self.directors.len() > 1 {
            "directors"
        } else {
            "director"
        }
    }
}

impl fmt::Display for ReportGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} {} ({} {}):",
            self.count,
            self.film_noun(),
            self.directors.len(),
            self.director_noun()
        )?;
        for director in &self.directors {
            writeln!(f, "{}", director)?;
        }
        writeln!(f)
    }
}

/// The full report, groups ordered by descending count
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    pub groups: Vec<ReportGroup>,
}

impl Report {
    /// Build the grouped report.
    ///
    /// ## Algorithm
    /// 1. Stable sort of all directors by count, descending
    /// 2. Split into runs of equal count
    /// 3. Stable sort of each run by surname initial
    ///
    /// The result depends on the first-seen order in `counts`, not only on
    /// the counts themselves: the same counts recorded in the same order
    /// always give the same report.
    pub fn from_counts(counts: &FilmCounts) -> Self {
        let mut by_count: Vec<(&str, u32)> = counts.iter().collect();
        by_count.sort_by(|a, b| b.1.cmp(&a.1));

        let groups = by_count
            .chunk_by(|a, b| a.1 == b.1)
            .map(|run| {
                let mut names: Vec<&str> = run.iter().map(|(name, _)| *name).collect();
                names.sort_by_key(|name| surname_initial(name));
                ReportGroup {
                    count: run[0].1,
                    directors: names.into_iter().map(str::to_string).collect(),
                }
            })
            .collect();

        Report { groups }
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for group in &self.groups {
            write!(f, "{}", group)?;
        }
        Ok(())
    }
}

/// First character of the last whitespace-separated token of `full_name`.
///
/// Example: "Chan-wook Park" -> Some('P'), "   " -> None
pub fn surname_initial(full_name: &str) -> Option<char> {
    full_name
        .split_whitespace()
        .next_back()
        .and_then(|surname| surname.chars().next())
}

/// Render counts as report text
///
/// Output is byte-identical for equal counts only when their first-seen
/// order also matches (see [`Report::from_counts`]).
pub fn render(counts: &FilmCounts) -> String {
    Report::from_counts(counts).to_string()
}
