//! Letterboxd director lookup.
//!
//! This crate provides the production `DirectorLookup`: it fetches a film's
//! Letterboxd page over HTTP and pulls the director string out of the
//! `twitter:data1` meta tag. It handles:
//! - Building a blocking HTTP client (no request timeout)
//! - Turning a film slug into a page URL
//! - Extracting the director value from the page HTML
//!
//! Any failure is reported as an error; the pipeline treats it as fatal.

use anyhow::Result;
use pipeline::DirectorLookup;
use regex::Regex;
use reqwest::blocking::Client;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Film pages live at `<base>/<slug>/`
pub const DEFAULT_BASE_URL: &str = "https://letterboxd.com/film/";

/// Meta tag carrying the director name(s) on a film page
const DIRECTOR_PATTERN: &str = r#"twitter:data1" content="(.*)""#;

const USER_AGENT: &str = concat!("director-tally/", env!("CARGO_PKG_VERSION"));

/// Errors that can occur when looking up a director
#[derive(Error, Debug)]
pub enum LookupClientError {
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),

    #[error("Invalid director pattern: {0}")]
    Pattern(String),

    #[error("Request to {url} failed: {reason}")]
    Request { url: String, reason: String },

    #[error("No director found on {url}")]
    DirectorNotFound { url: String },
}

/// Client for Letterboxd film pages.
pub struct LetterboxdClient {
    http: Client,
    base_url: String,
    pattern: Regex,
}

impl LetterboxdClient {
    /// Create a client for the public Letterboxd site
    pub fn new() -> Result<Self, LookupClientError> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Create a client against another base URL (mirrors, local fixtures)
    ///
    /// A missing trailing `/` is added.
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, LookupClientError> {
        let mut base_url = base_url.into();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }

        let http = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(None::<Duration>)
            .build()
            .map_err(|e| LookupClientError::ClientBuild(e.to_string()))?;

        let pattern =
            Regex::new(DIRECTOR_PATTERN).map_err(|e| LookupClientError::Pattern(e.to_string()))?;

        Ok(Self {
            http,
            base_url,
            pattern,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Page URL for a film slug
    pub fn film_url(&self, film_id: &str) -> String {
        format!("{}{}/", self.base_url, film_id)
    }

    /// Pull the director value out of a film page.
    ///
    /// Returns the first match; the capture is greedy up to the last quote
    /// on that line.
    pub fn extract_director(&self, html: &str) -> Option<String> {
        self.pattern
            .captures(html)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    }

    /// Fetch a film page and extract its director string.
    pub fn fetch_director(&self, film_id: &str) -> Result<String, LookupClientError> {
        let url = self.film_url(film_id);
        debug!("GET {}", url);

        let request_err = |e: reqwest::Error| LookupClientError::Request {
            url: url.clone(),
            reason: e.to_string(),
        };

        let html = self
            .http
            .get(&url)
            .send()
            .and_then(|response| response.error_for_status())
            .and_then(|response| response.text())
            .map_err(request_err)?;

        self.extract_director(&html)
            .ok_or(LookupClientError::DirectorNotFound { url })
    }
}

impl DirectorLookup for LetterboxdClient {
    fn name(&self) -> &str {
        "LetterboxdClient"
    }

    fn lookup(&self, film_id: &str) -> Result<String> {
        Ok(self.fetch_director(film_id)?)
    }
}
