//! songpack-cb (Catalog Builder) library
//!
//! Walks a tree of song assets laid out as `<pack>/<song>/...` and produces
//! the static JSON index consumed by the game client:
//! - `packs.json`: every pack name, sorted
//! - `packs/<pack>.json`: every playable song of that pack, sorted

use std::path::Path;

use tracing::info;

pub mod catalog;
pub mod classify;
pub mod error;
pub mod scanner;
pub mod song_path;
pub mod writer;

pub use catalog::{Catalog, Pack, Song};
pub use classify::{classify_files, AssetRule, SongAssets};
pub use error::{CatalogError, Result};
pub use scanner::{CatalogBuilder, ScanReport};
pub use song_path::SongPath;
pub use writer::{write_catalog, PACKS_DIR, PACKS_INDEX};

/// Outcome of a full generate run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateSummary {
    /// Number of packs written to `packs.json`
    pub packs: usize,
    /// Number of songs written across all pack files
    pub songs: usize,
    /// Song folders dropped for lacking audio or chart
    pub skipped: usize,
}

/// Scan `root` and write the catalog JSON files into it
///
/// `prefix` is prepended to every asset URI (may be empty).
pub fn generate(root: &Path, prefix: &str) -> Result<GenerateSummary> {
    let report = CatalogBuilder::new(root, prefix).scan()?;
    write_catalog(&report.catalog, root)?;

    let summary = GenerateSummary {
        packs: report.catalog.pack_count(),
        songs: report.catalog.song_count(),
        skipped: report.skipped,
    };

    info!(
        "Catalog written to {}: {} packs, {} songs ({} folders skipped)",
        root.display(),
        summary.packs,
        summary.songs,
        summary.skipped
    );

    Ok(summary)
}
