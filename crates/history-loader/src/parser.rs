//! Parsers for the two CSV shapes this tool reads.
//!
//! - `watched.csv` from a Letterboxd export: `Date,Name,Year,Letterboxd URI`
//!   with a header row. The film slug is the 5th `/`-separated segment of
//!   the URI (`https://letterboxd.com/film/<slug>/`).
//! - the director cache: `slug,director` with no header.
//!
//! Both readers are `flexible` so a short row is reported by us with a line
//! number instead of as a generic csv error.

use crate::error::{DataLoadError, Result};
use crate::types::*;
use std::io::Read;

/// Column holding the film URI in `watched.csv`
pub const URL_COLUMN: usize = 3;

/// Path segment of the URI holding the slug
pub const SLUG_SEGMENT: usize = 4;

/// Fields per row in the cache file
const CACHE_FIELDS: usize = 2;

/// Parse `watched.csv` rows, skipping the header row
///
/// `file` is only used to label errors.
pub fn parse_watched<R: Read>(reader: R, file: &str) -> Result<Vec<WatchedEntry>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let mut entries = Vec::new();

    for (idx, record) in rdr.records().enumerate() {
        let record = record.map_err(|source| DataLoadError::CsvError {
            file: file.to_string(),
            source,
        })?;
        // Line 1 is the header
        let line_no = start_line(&record, idx + 2);

        let url = record
            .get(URL_COLUMN)
            .ok_or(DataLoadError::FieldCountMismatch {
                expected: URL_COLUMN + 1,
                found: record.len(),
                line: line_no,
            })?;

        entries.push(WatchedEntry {
            line: line_no,
            film_id: extract_film_id(url, file, line_no)?,
        });
    }

    Ok(entries)
}

/// Line the record starts on; quoted fields may span several lines
fn start_line(record: &csv::StringRecord, fallback: usize) -> usize {
    record
        .position()
        .map(|pos| pos.line() as usize)
        .unwrap_or(fallback)
}

/// Pull the slug out of a film URI
///
/// Example: "https://letterboxd.com/film/the-thing/" -> Some("the-thing")
///          "" -> None
fn extract_film_id(url: &str, file: &str, line_no: usize) -> Result<Option<FilmId>> {
    if url.is_empty() {
        return Ok(None);
    }

    let slug = url
        .split('/')
        .nth(SLUG_SEGMENT)
        .ok_or_else(|| DataLoadError::ParseError {
            file: file.to_string(),
            line: line_no,
            reason: format!("URL has no film segment: {}", url),
        })?;

    Ok(Some(slug.to_string()))
}

/// Parse the director cache (`slug,director`, no header)
///
/// Repeated slugs keep the last row.
pub fn parse_cache<R: Read>(reader: R, file: &str) -> Result<Cache> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut cache = Cache::new();

    for (idx, record) in rdr.records().enumerate() {
        let record = record.map_err(|source| DataLoadError::CsvError {
            file: file.to_string(),
            source,
        })?;
        let line_no = start_line(&record, idx + 1);

        if record.len() != CACHE_FIELDS {
            return Err(DataLoadError::FieldCountMismatch {
                expected: CACHE_FIELDS,
                found: record.len(),
                line: line_no,
            });
        }

        cache.insert(&record[0], &record[1]);
    }

    Ok(cache)
}
