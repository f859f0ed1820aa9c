//! Track catalog
//!
//! Maps 1-based track numbers to media files. The catalog is rebuilt from the
//! directory listing on every request: recognised files sorted by name get
//! numbers 1..=N with no gaps. Nothing is cached, so a file dropped into the
//! directory is playable on the next button press.

use std::collections::BTreeMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use rcv_common::config::normalize_extensions;
use tracing::debug;

use crate::error::{PlaybackError, Result};

/// Where media lives and which files count as media
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    media_directory: PathBuf,
    /// Lower-case suffixes including the leading dot (".mp3")
    suffixes: Vec<String>,
}

impl CatalogConfig {
    /// Extensions may be given with or without a leading dot, in any case
    pub fn new<S: AsRef<str>>(media_directory: impl Into<PathBuf>, extensions: &[S]) -> Self {
        let suffixes = normalize_extensions(extensions)
            .into_iter()
            .map(|ext| format!(".{}", ext))
            .collect();

        Self {
            media_directory: media_directory.into(),
            suffixes,
        }
    }

    pub fn media_directory(&self) -> &Path {
        &self.media_directory
    }

    /// Case-insensitive suffix match against the recognised set
    pub fn is_recognized(&self, file_name: &str) -> bool {
        let lower = file_name.to_lowercase();
        self.suffixes.iter().any(|suffix| lower.ends_with(suffix.as_str()))
    }
}

/// Snapshot of the media directory
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    tracks: BTreeMap<u32, PathBuf>,
}

impl Catalog {
    /// Path for a track number, if present
    pub fn get(&self, track_number: u32) -> Option<&Path> {
        self.tracks.get(&track_number).map(PathBuf::as_path)
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Tracks in number order
    pub fn iter(&self) -> impl Iterator<Item = (u32, &Path)> {
        self.tracks.iter().map(|(n, p)| (*n, p.as_path()))
    }
}

/// Base name of a media path, for display on the remote
pub fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// List the media directory and number recognised files in name order
///
/// Only regular files (or links to them) are considered. Fails as a whole if
/// the directory or any entry cannot be read.
pub fn build_catalog(config: &CatalogConfig) -> Result<Catalog> {
    let dir = config.media_directory();
    let access_error = |source| PlaybackError::DirectoryAccess {
        path: dir.to_path_buf(),
        source,
    };

    let mut names: Vec<OsString> = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(access_error)? {
        let entry = entry.map_err(access_error)?;
        let name = entry.file_name();

        if !config.is_recognized(&name.to_string_lossy()) {
            continue;
        }
        if !entry.path().is_file() {
            continue;
        }
        names.push(name);
    }

    names.sort();

    let tracks: BTreeMap<u32, PathBuf> = (1..)
        .zip(names)
        .map(|(n, name)| (n, dir.join(name)))
        .collect();

    debug!(
        "Catalog for {}: {} tracks",
        dir.display(),
        tracks.len()
    );

    Ok(Catalog { tracks })
}
