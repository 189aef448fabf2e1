//! JSON output of a catalog
//!
//! Layout under the catalog root:
//! - `packs.json`
//! - `packs/<pack>.json`
//!
//! Files are always overwritten in full.

use std::fs::{self, File};
use std::io::{BufWriter, ErrorKind, Write};
use std::path::Path;

use serde::Serialize;
use tracing::debug;

use crate::catalog::Catalog;
use crate::error::{CatalogError, Result};

/// Pack index file name
pub const PACKS_INDEX: &str = "packs.json";

/// Directory holding one file per pack
pub const PACKS_DIR: &str = "packs";

/// Write `packs.json` and every `packs/<pack>.json` under `root`
///
/// The `packs/` directory is created if missing; an existing one is reused.
pub fn write_catalog(catalog: &Catalog, root: &Path) -> Result<()> {
    write_json(&root.join(PACKS_INDEX), &catalog.packs())?;

    let packs_dir = root.join(PACKS_DIR);
    ensure_dir(&packs_dir)?;

    for (pack, songs) in catalog.iter() {
        let path = packs_dir.join(format!("{pack}.json"));
        write_json(&path, &songs)?;
        debug!("Wrote {} ({} songs)", path.display(), songs.len());
    }

    Ok(())
}

fn ensure_dir(path: &Path) -> Result<()> {
    match fs::create_dir(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::AlreadyExists => Ok(()),
        Err(source) => Err(CatalogError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let io_error = |source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(io_error)?;
    let mut writer = BufWriter::new(file);

    serde_json::to_writer(&mut writer, value).map_err(|source| CatalogError::Json {
        path: path.to_path_buf(),
        source,
    })?;

    writer.flush().map_err(io_error)
}
