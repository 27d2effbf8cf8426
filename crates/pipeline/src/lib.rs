//! Pipeline for turning watched films into a per-director report.
//!
//! This crate provides:
//! - DirectorLookup trait, the seam to whatever knows a film's directors
//! - Resolver for cache-first resolution with a throttled fallback
//! - aggregate() for counting films per director
//! - Report for the grouped, sorted text output
//!
//! ## Architecture
//! The pipeline processes films in stages:
//! 1. Resolver answers each film from the cache or the lookup
//! 2. aggregate() splits co-directors and tallies counts
//! 3. Report groups the tally by count and renders it
//!
//! ## Example Usage
//! ```ignore
//! use pipeline::{aggregate, render, Resolver};
//!
//! let resolver = Resolver::new(client).with_delay(Duration::from_millis(500));
//! let aggregation = aggregate(&resolver, &film_ids, &cache)?;
//!
//! let text = render(&aggregation.counts);
//! ```

pub mod traits;
pub mod error;
pub mod resolver;
pub mod aggregator;
pub mod report;

// Re-export main types
pub use traits::DirectorLookup;
pub use error::ResolveError;
pub use resolver::{Resolver, DEFAULT_REQUEST_DELAY};
pub use aggregator::{aggregate, count_directors, Aggregation};
pub use report::{render, Report, ReportGroup};
