//! End-to-end runs over real zip archives in a temp directory.
//!
//! These tests cover what each run leaves on disk: the cache file and the
//! report, or nothing at all when the run fails.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use std::time::Duration;

use anyhow::anyhow;
use orchestrator::{TallyConfig, TallyError, TallyOrchestrator};
use pipeline::DirectorLookup;
use zip::write::SimpleFileOptions;

const HEADER: &str = "Date,Name,Year,Letterboxd URI\n";

/// Lookup backed by a table; remembers which films it was asked for
struct FakeLetterboxd {
    pages: HashMap<String, String>,
    requested: RefCell<Vec<String>>,
}

impl FakeLetterboxd {
    fn new(pages: &[(&str, &str)]) -> Self {
        Self {
            pages: pages
                .iter()
                .map(|(id, d)| (id.to_string(), d.to_string()))
                .collect(),
            requested: RefCell::new(Vec::new()),
        }
    }
}

impl DirectorLookup for FakeLetterboxd {
    fn name(&self) -> &str {
        "FakeLetterboxd"
    }

    fn lookup(&self, film_id: &str) -> anyhow::Result<String> {
        self.requested.borrow_mut().push(film_id.to_string());
        self.pages
            .get(film_id)
            .cloned()
            .ok_or_else(|| anyhow!("twitter:data1 missing for {}", film_id))
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter("debug")
        .try_init();
}

fn write_export(path: &Path, watched_rows: &[&str]) {
    let file = File::create(path).unwrap();
    let mut writer = zip::ZipWriter::new(file);
    writer
        .start_file("watched.csv", SimpleFileOptions::default())
        .unwrap();
    writer.write_all(HEADER.as_bytes()).unwrap();
    for row in watched_rows {
        writer.write_all(row.as_bytes()).unwrap();
        writer.write_all(b"\n").unwrap();
    }
    writer.finish().unwrap();
}

fn config_in(dir: &Path) -> TallyConfig {
    TallyConfig {
        cache_path: dir.join("cache.csv"),
        output_path: dir.join("output.txt"),
        request_delay: Duration::ZERO,
        ..TallyConfig::default()
    }
}

#[test]
fn test_full_run_writes_cache_and_report() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let export = dir.path().join("letterboxd.zip");
    write_export(
        &export,
        &[
            "2024-01-01,Hot Fuzz,2007,https://letterboxd.com/film/hot-fuzz/",
            "2024-01-02,Oldboy,2003,https://letterboxd.com/film/oldboy/",
            "2024-01-03,Mystery Row,,",
            "2024-01-04,Fargo,1996,https://letterboxd.com/film/fargo/",
            "2024-01-05,Baby Driver,2017,https://letterboxd.com/film/baby-driver/",
            "2024-01-06,The Handmaiden,2016,https://letterboxd.com/film/the-handmaiden/",
        ],
    );
    let lookup = FakeLetterboxd::new(&[
        ("hot-fuzz", "Edgar Wright"),
        ("oldboy", "Park Chan-wook"),
        ("fargo", "Joel Coen, Ethan Coen"),
        ("baby-driver", "Edgar Wright"),
        ("the-handmaiden", "Park Chan-wook"),
    ]);
    let orchestrator = TallyOrchestrator::new(config_in(dir.path()), &lookup);

    let summary = orchestrator.process_archive(&export).unwrap();

    assert_eq!(summary.films_processed, 5);
    assert_eq!(summary.films_fetched, 5);
    assert_eq!(summary.cache_entries, 5);
    assert_eq!(summary.directors, 4);

    let report = fs::read_to_string(dir.path().join("output.txt")).unwrap();
    assert_eq!(
        report,
        "2 films (2 directors):\n\
         Park Chan-wook\n\
         Edgar Wright\n\
         \n\
         1 film (2 directors):\n\
         Joel Coen\n\
         Ethan Coen\n\
         \n"
    );

    let cache = fs::read_to_string(dir.path().join("cache.csv")).unwrap();
    assert!(cache.contains("fargo,\"Joel Coen, Ethan Coen\"\n"));
    assert!(cache.contains("oldboy,Park Chan-wook\n"));
}

#[test]
fn test_second_run_uses_cache() {
    let dir = tempfile::tempdir().unwrap();
    let export = dir.path().join("letterboxd.zip");
    write_export(
        &export,
        &["2024-01-01,Ran,1985,https://letterboxd.com/film/ran/"],
    );

    let first = FakeLetterboxd::new(&[("ran", "Akira Kurosawa")]);
    TallyOrchestrator::new(config_in(dir.path()), &first)
        .process_archive(&export)
        .unwrap();
    assert_eq!(first.requested.borrow().len(), 1);

    let second = FakeLetterboxd::new(&[]);
    let summary = TallyOrchestrator::new(config_in(dir.path()), &second)
        .process_archive(&export)
        .unwrap();

    assert!(second.requested.borrow().is_empty());
    assert_eq!(summary.films_fetched, 0);
    assert_eq!(summary.cache_entries, 1);
}

#[test]
fn test_unresolvable_film_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let export = dir.path().join("letterboxd.zip");
    write_export(
        &export,
        &[
            "2024-01-01,Alien,1979,https://letterboxd.com/film/alien/",
            "2024-01-02,Lost Film,1920,https://letterboxd.com/film/lost-film/",
        ],
    );
    fs::write(dir.path().join("cache.csv"), "heat,Michael Mann\n").unwrap();

    let lookup = FakeLetterboxd::new(&[("alien", "Ridley Scott")]);
    let err = TallyOrchestrator::new(config_in(dir.path()), &lookup)
        .process_archive(&export)
        .unwrap_err();

    assert!(matches!(err, TallyError::Resolution(_)));
    // The cache keeps its old contents and no report appears
    assert_eq!(
        fs::read_to_string(dir.path().join("cache.csv")).unwrap(),
        "heat,Michael Mann\n"
    );
    assert!(!dir.path().join("output.txt").exists());
}

#[test]
fn test_export_without_watched_member() {
    let dir = tempfile::tempdir().unwrap();
    let export = dir.path().join("letterboxd.zip");
    let mut writer = zip::ZipWriter::new(File::create(&export).unwrap());
    writer
        .start_file("ratings.csv", SimpleFileOptions::default())
        .unwrap();
    writer.write_all(HEADER.as_bytes()).unwrap();
    writer.finish().unwrap();

    let lookup = FakeLetterboxd::new(&[]);
    let err = TallyOrchestrator::new(config_in(dir.path()), &lookup)
        .process_archive(&export)
        .unwrap_err();

    assert!(matches!(err, TallyError::InvalidArchive { .. }));
    assert!(err.is_input_error());
    assert!(err.to_string().ends_with("is not a valid Letterboxd data file"));
    assert!(!dir.path().join("cache.csv").exists());
    assert!(!dir.path().join("output.txt").exists());
}
