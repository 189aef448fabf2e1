//! In-memory catalog of packs and songs
//!
//! Backed by `BTreeMap`s so iteration (and therefore JSON output) is always
//! sorted by name, independent of filesystem enumeration order.

use std::collections::BTreeMap;

use serde::Serialize;

/// Entry of `packs.json`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pack {
    pub name: String,
}

/// Entry of `packs/<pack>.json`
///
/// Field order is the JSON key order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Song {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub banner: Option<String>,
    pub audio: String,
    pub chart: String,
}

/// All packs found in one run, each with its included songs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    packs: BTreeMap<String, BTreeMap<String, Song>>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a pack, even if none of its songs end up included
    pub fn add_pack(&mut self, pack: &str) {
        self.packs.entry(pack.to_string()).or_default();
    }

    /// Insert a song under `pack`, returning the entry it replaced
    pub fn insert_song(&mut self, pack: &str, song: Song) -> Option<Song> {
        self.packs
            .entry(pack.to_string())
            .or_default()
            .insert(song.name.clone(), song)
    }

    /// Packs sorted by name
    pub fn packs(&self) -> Vec<Pack> {
        self.packs
            .keys()
            .map(|name| Pack { name: name.clone() })
            .collect()
    }

    /// Songs of `pack` sorted by name (empty for unknown packs)
    pub fn songs(&self, pack: &str) -> Vec<&Song> {
        self.packs
            .get(pack)
            .map(|songs| songs.values().collect())
            .unwrap_or_default()
    }

    /// Iterate `(pack name, sorted songs)` in pack order
    pub fn iter(&self) -> impl Iterator<Item = (&str, Vec<&Song>)> {
        self.packs
            .iter()
            .map(|(name, songs)| (name.as_str(), songs.values().collect()))
    }

    pub fn pack_count(&self) -> usize {
        self.packs.len()
    }

    pub fn song_count(&self) -> usize {
        self.packs.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.packs.is_empty()
    }
}
