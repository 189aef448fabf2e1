//! File classification for song folders
//!
//! Each file is checked against every rule in [`RULES`], in order. Rules are
//! independent: one file may feed several fields (e.g. `bg_bn.png` sets both
//! background and banner), and a later file overwrites what an earlier one set.

use std::path::Path;

use crate::catalog::Song;
use crate::song_path::SongPath;

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "png"];
const AUDIO_EXTENSIONS: &[&str] = &["mp3", "ogg"];
const CHART_EXTENSIONS: &[&str] = &["dwi", "sm", "ssc"];

const BACKGROUND_MARKER: &str = "bg";
const BANNER_MARKER: &str = "bn";

/// One classification rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetRule {
    /// Image whose stem contains `bg`
    Background,
    /// Image whose stem contains `bn`
    Banner,
    /// Any other image, only while no banner has been found
    FallbackBanner,
    /// `.mp3` / `.ogg`
    Audio,
    /// `.dwi` / `.sm` / `.ssc`
    Chart,
}

/// Rules in evaluation order
pub const RULES: [AssetRule; 5] = [
    AssetRule::Background,
    AssetRule::Banner,
    AssetRule::FallbackBanner,
    AssetRule::Audio,
    AssetRule::Chart,
];

/// File name split the way the rules look at it
#[derive(Debug, Clone, Copy)]
struct AssetFile<'a> {
    name: &'a str,
    stem: &'a str,
    extension: &'a str,
}

impl<'a> AssetFile<'a> {
    fn parse(name: &'a str) -> Self {
        let path = Path::new(name);
        let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or(name);
        let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        Self {
            name,
            stem,
            extension,
        }
    }

    fn has_extension(&self, extensions: &[&str]) -> bool {
        extensions.contains(&self.extension)
    }

    fn is_image(&self) -> bool {
        self.has_extension(IMAGE_EXTENSIONS)
    }
}

impl AssetRule {
    fn matches(self, file: &AssetFile<'_>, assets: &SongAssets) -> bool {
        match self {
            Self::Background => file.is_image() && file.stem.contains(BACKGROUND_MARKER),
            Self::Banner => file.is_image() && file.stem.contains(BANNER_MARKER),
            Self::FallbackBanner => {
                file.is_image()
                    && !file.stem.contains(BANNER_MARKER)
                    && !file.stem.contains(BACKGROUND_MARKER)
                    && assets.banner.is_none()
            }
            Self::Audio => file.has_extension(AUDIO_EXTENSIONS),
            Self::Chart => file.has_extension(CHART_EXTENSIONS),
        }
    }

    fn apply(self, uri: String, assets: &mut SongAssets) {
        let slot = match self {
            Self::Background => &mut assets.background,
            Self::Banner | Self::FallbackBanner => &mut assets.banner,
            Self::Audio => &mut assets.audio,
            Self::Chart => &mut assets.chart,
        };
        *slot = Some(uri);
    }
}

/// Asset URIs found in one song folder
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SongAssets {
    pub background: Option<String>,
    pub banner: Option<String>,
    pub audio: Option<String>,
    pub chart: Option<String>,
}

impl SongAssets {
    /// Turn the collected assets into a catalog entry
    ///
    /// Returns `None` unless both audio and chart were found.
    pub fn into_song(self, name: &str) -> Option<Song> {
        let Self {
            background,
            banner,
            audio: Some(audio),
            chart: Some(chart),
        } = self
        else {
            return None;
        };

        Some(Song {
            name: name.to_string(),
            background,
            banner,
            audio,
            chart,
        })
    }
}

/// Classify the files directly inside a song folder
///
/// `files` are bare file names in enumeration order.
pub fn classify_files<S: AsRef<str>>(song_path: &SongPath, prefix: &str, files: &[S]) -> SongAssets {
    let mut assets = SongAssets::default();

    for name in files {
        let file = AssetFile::parse(name.as_ref());
        for rule in RULES {
            if rule.matches(&file, &assets) {
                rule.apply(song_path.asset_uri(prefix, file.name), &mut assets);
            }
        }
    }

    assets
}
