//! Reading the Letterboxd export archive.
//!
//! The export is a zip file; the watch history is the `watched.csv` member.

use crate::error::{DataLoadError, Result};
use crate::parser;
use crate::types::WatchedEntry;
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;
use tracing::debug;
use zip::ZipArchive;
use zip::result::ZipError;

/// Name of the watch-history member inside an export
pub const WATCHED_MEMBER: &str = "watched.csv";

/// Read one member of the archive at `path` as UTF-8 text
pub fn read_member(path: &Path, member: &str) -> Result<String> {
    let path_label = path.display().to_string();

    let file = File::open(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => DataLoadError::FileNotFound {
            path: path_label.clone(),
        },
        _ => DataLoadError::IoError(e),
    })?;

    let mut archive = ZipArchive::new(file).map_err(|e| DataLoadError::InvalidArchive {
        path: path_label.clone(),
        reason: e.to_string(),
    })?;

    let mut entry = archive.by_name(member).map_err(|e| match e {
        ZipError::FileNotFound => DataLoadError::MissingMember {
            path: path_label.clone(),
            member: member.to_string(),
        },
        other => DataLoadError::InvalidArchive {
            path: path_label.clone(),
            reason: other.to_string(),
        },
    })?;

    let mut content = String::new();
    entry
        .read_to_string(&mut content)
        .map_err(|e| DataLoadError::InvalidArchive {
            path: path_label.clone(),
            reason: format!("{} is not readable UTF-8 text: {}", member, e),
        })?;

    debug!("Read {} bytes from {}:{}", content.len(), path_label, member);
    Ok(content)
}

/// Read and parse the watch history from an export archive
pub fn load_watched_history(path: &Path, member: &str) -> Result<Vec<WatchedEntry>> {
    let content = read_member(path, member)?;
    parser::parse_watched(content.as_bytes(), member)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::SimpleFileOptions;

    fn write_archive(path: &Path, members: &[(&str, &str)]) {
        let file = File::create(path).unwrap();
        let mut writer = zip::ZipWriter::new(file);
        for (name, content) in members {
            writer
                .start_file(*name, SimpleFileOptions::default())
                .unwrap();
            writer.write_all(content.as_bytes()).unwrap();
        }
        writer.finish().unwrap();
    }

    #[test]
    fn test_load_watched_history() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("export.zip");
        write_archive(
            &path,
            &[
                ("profile.csv", "Username\nsomeone\n"),
                (
                    WATCHED_MEMBER,
                    "Date,Name,Year,Letterboxd URI\n2024-05-01,Alien,1979,https://letterboxd.com/film/alien/\n",
                ),
            ],
        );

        let entries = load_watched_history(&path, WATCHED_MEMBER).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].film_id.as_deref(), Some("alien"));
    }

    #[test]
    fn test_missing_archive() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_member(&dir.path().join("nope.zip"), WATCHED_MEMBER).unwrap_err();
        assert!(matches!(err, DataLoadError::FileNotFound { .. }));
    }

    #[test]
    fn test_not_a_zip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("export.zip");
        std::fs::write(&path, "definitely not a zip").unwrap();

        let err = read_member(&path, WATCHED_MEMBER).unwrap_err();
        assert!(matches!(err, DataLoadError::InvalidArchive { .. }));
        assert!(err.is_invalid_export());
    }

    #[test]
    fn test_missing_member() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("export.zip");
        write_archive(&path, &[("ratings.csv", "Date,Name\n")]);

        let err = read_member(&path, WATCHED_MEMBER).unwrap_err();
        assert!(matches!(err, DataLoadError::MissingMember { .. }));
    }
}
