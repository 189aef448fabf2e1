//! Song folder location relative to the catalog root

use std::path::{Component, Path};

/// Minimum relative depth of a song folder: `<pack>/<song>`
pub const MIN_SONG_DEPTH: usize = 2;

/// Relative path segments of a song folder
///
/// Only constructed for folders at depth ≥ 2, so `pack()` and `song()` always
/// exist. Folders nested deeper (`<group>/<pack>/<song>`) keep every segment
/// for URI building; the last two name the pack and the song.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SongPath {
    segments: Vec<String>,
}

impl SongPath {
    /// Build from a path relative to the catalog root
    ///
    /// Returns `None` when the path is shallower than a song folder.
    pub fn from_relative(relative: &Path) -> Option<Self> {
        let segments: Vec<String> = relative
            .components()
            .filter_map(|component| match component {
                Component::Normal(name) => Some(name.to_string_lossy().into_owned()),
                _ => None,
            })
            .collect();

        if segments.len() < MIN_SONG_DEPTH {
            return None;
        }

        Some(Self { segments })
    }

    /// Pack name (second-to-last segment)
    pub fn pack(&self) -> &str {
        &self.segments[self.segments.len() - 2]
    }

    /// Song name (last segment)
    pub fn song(&self) -> &str {
        &self.segments[self.segments.len() - 1]
    }

    /// All segments from the catalog root down to the song folder
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Served URI of `file_name` inside this folder
    ///
    /// No escaping is applied; asset names are expected to be URL-safe.
    pub fn asset_uri(&self, prefix: &str, file_name: &str) -> String {
        format!("{}/{}/{}", prefix, self.segments.join("/"), file_name)
    }
}

impl std::fmt::Display for SongPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.segments.join("/"))
    }
}
