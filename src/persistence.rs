// File: src/persistence.rs
use crate::error::Result;
use crate::store::SiteStore;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::debug;

const SNAPSHOT_VERSION: u32 = 1;

/// The serializable state of a site.
#[derive(Clone, Serialize, Deserialize)]
struct SerializableState {
    version: u32,
    site: SiteStore,
}

/// Writes the store next to `path` and renames it into place, so a crash
/// never leaves a half-written snapshot.
pub fn save_to_disk(site: &SiteStore, path: &Path) -> Result<()> {
    let parent_dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent_dir)?;

    let state = SerializableState { version: SNAPSHOT_VERSION, site: site.clone() };

    let temp_file = NamedTempFile::new_in(parent_dir)?;
    {
        let mut writer = BufWriter::new(temp_file.as_file());
        bincode::serialize_into(&mut writer, &state)?;
        writer.flush()?;
    }

    temp_file.persist(path).map_err(|e| e.error)?;
    debug!(path = %path.display(), "site snapshot saved");
    Ok(())
}

pub fn load_from_disk(path: &Path) -> Result<SiteStore> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let state: SerializableState = bincode::deserialize_from(reader)?;
    debug!(path = %path.display(), version = state.version, "site snapshot loaded");
    Ok(state.site)
}
