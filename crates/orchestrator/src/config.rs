//! Run configuration.

use std::path::PathBuf;
use std::time::Duration;

use history_loader::archive::WATCHED_MEMBER;
use history_loader::cache::DEFAULT_CACHE_FILE;
use pipeline::DEFAULT_REQUEST_DELAY;

/// Default report location, relative to the working directory
pub const DEFAULT_OUTPUT_FILE: &str = "output.txt";

/// Where a run reads and writes, and how fast it may hit the lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TallyConfig {
    /// Director cache, read at start and rewritten at the end
    pub cache_path: PathBuf,
    /// Report destination, overwritten on success
    pub output_path: PathBuf,
    /// Watch-history member inside the export archive
    pub watched_member: String,
    /// Sleep after every lookup
    pub request_delay: Duration,
}

impl Default for TallyConfig {
    fn default() -> Self {
        Self {
            cache_path: PathBuf::from(DEFAULT_CACHE_FILE),
            output_path: PathBuf::from(DEFAULT_OUTPUT_FILE),
            watched_member: WATCHED_MEMBER.to_string(),
            request_delay: DEFAULT_REQUEST_DELAY,
        }
    }
}
