//! Song folder discovery
//!
//! Single sequential pass over the asset tree. Files are grouped by their
//! parent folder; every folder at depth ≥ 2 holding at least one file is a
//! song candidate and goes through classification and the inclusion gate.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

use crate::catalog::Catalog;
use crate::classify::classify_files;
use crate::error::{CatalogError, Result};
use crate::song_path::SongPath;

/// Result of scanning an asset tree
#[derive(Debug, Clone)]
pub struct ScanReport {
    /// Packs and included songs
    pub catalog: Catalog,
    /// Song folders visited (included or not)
    pub song_folders: usize,
    /// Song folders dropped for lacking audio or chart
    pub skipped: usize,
}

/// Builds a [`Catalog`] from a directory tree
pub struct CatalogBuilder {
    root: PathBuf,
    prefix: String,
}

impl CatalogBuilder {
    /// `prefix` is prepended to every asset URI (may be empty)
    pub fn new(root: impl Into<PathBuf>, prefix: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            prefix: prefix.into(),
        }
    }

    /// Walk the tree and classify every song folder
    ///
    /// Any traversal error aborts the scan.
    pub fn scan(&self) -> Result<ScanReport> {
        if !self.root.exists() {
            return Err(CatalogError::PathNotFound(self.root.clone()));
        }

        if !self.root.is_dir() {
            return Err(CatalogError::NotADirectory(self.root.clone()));
        }

        let folders = self.collect_song_folders()?;
        let song_folders = folders.len();

        let mut catalog = Catalog::new();
        let mut sources: HashMap<(String, String), SongPath> = HashMap::new();
        let mut skipped = 0;

        for (song_path, files) in folders {
            catalog.add_pack(song_path.pack());

            let assets = classify_files(&song_path, &self.prefix, &files);
            let Some(song) = assets.into_song(song_path.song()) else {
                debug!("Skipping {}: no audio or no chart", song_path);
                skipped += 1;
                continue;
            };

            if catalog.insert_song(song_path.pack(), song).is_some() {
                // Later folder wins; surface the collision instead of hiding it
                let key = (song_path.pack().to_string(), song_path.song().to_string());
                if let Some(previous) = sources.get(&key) {
                    warn!(
                        "Song '{}' in pack '{}' found in both {} and {}; keeping {}",
                        key.1, key.0, previous, song_path, song_path
                    );
                }
            }

            sources.insert(
                (song_path.pack().to_string(), song_path.song().to_string()),
                song_path,
            );
        }

        debug!(
            "Scan complete: {} song folders, {} skipped",
            song_folders, skipped
        );

        Ok(ScanReport {
            catalog,
            song_folders,
            skipped,
        })
    }

    /// Group file names by song folder
    ///
    /// Directory entries are visited in file-name order, so file lists (and
    /// "last match wins" classification) are deterministic.
    fn collect_song_folders(&self) -> Result<BTreeMap<SongPath, Vec<String>>> {
        let mut folders: BTreeMap<SongPath, Vec<String>> = BTreeMap::new();

        let walker = WalkDir::new(&self.root)
            .follow_links(false)
            .sort_by_file_name();

        for entry in walker {
            let entry = entry?;
            if !is_file_entry(&entry) {
                continue;
            }

            let Some(song_path) = self.song_path_of(entry.path()) else {
                continue;
            };

            folders
                .entry(song_path)
                .or_default()
                .push(entry.file_name().to_string_lossy().into_owned());
        }

        Ok(folders)
    }

    /// Song folder containing `file`, if its parent is deep enough
    fn song_path_of(&self, file: &Path) -> Option<SongPath> {
        let parent = file.parent()?;
        let relative = parent.strip_prefix(&self.root).ok()?;
        SongPath::from_relative(relative)
    }
}

/// Anything that is not a directory, dangling symlinks included
///
/// Symlinked directories are neither walked nor listed as files.
fn is_file_entry(entry: &DirEntry) -> bool {
    if entry.file_type().is_dir() {
        return false;
    }
    !(entry.path_is_symlink() && entry.path().is_dir())
}
