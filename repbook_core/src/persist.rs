//! Workout snapshot persistence with file locking.
//!
//! The whole aggregate store is written as a single JSON snapshot. Writes
//! go through a locked temp file and an atomic rename, so a reader either
//! sees the complete previous snapshot or the complete new one; a failed
//! write leaves nothing behind.

use crate::{Result, WorkoutStore};
use fs2::FileExt;
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use tempfile::NamedTempFile;

impl WorkoutStore {
    /// Load the store from a snapshot file with shared locking
    ///
    /// A missing file yields an empty store. A present but unreadable or
    /// corrupt snapshot is an error: workout history is not
    /// reconstructible, so it must never be silently dropped.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::info!("No workout snapshot at {:?}, starting empty", path);
            return Ok(Self::new());
        }

        let file = File::open(path)?;
        file.lock_shared()?;

        let mut contents = String::new();
        let mut reader = std::io::BufReader::new(&file);
        let read_result = reader.read_to_string(&mut contents);
        file.unlock()?;
        read_result?;

        let store: WorkoutStore = serde_json::from_str(&contents)?;
        tracing::debug!("Loaded {} workouts from {:?}", store.len(), path);
        Ok(store)
    }

    /// Save the store to a snapshot file with exclusive locking
    ///
    /// Writes to a temp file in the same directory, syncs it, then renames
    /// it over the original.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let temp = NamedTempFile::new_in(path.parent().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::Other, "snapshot path missing parent")
        })?)?;

        temp.as_file().lock_exclusive()?;
        {
            let mut writer = std::io::BufWriter::new(temp.as_file());
            let contents = serde_json::to_string(self)?;
            writer.write_all(contents.as_bytes())?;
            writer.flush()?;
        }
        temp.as_file().sync_all()?;
        temp.as_file().unlock()?;

        temp.persist(path).map_err(|e| crate::Error::Io(e.error))?;

        tracing::debug!("Saved {} workouts to {:?}", self.len(), path);
        Ok(())
    }

    /// Load the store, apply a mutation, and save it back
    ///
    /// The snapshot is only rewritten when the mutation succeeds, which
    /// gives CLI write commands their all-or-nothing boundary.
    pub fn update<F, T>(path: &Path, f: F) -> Result<T>
    where
        F: FnOnce(&mut WorkoutStore) -> Result<T>,
    {
        let mut store = Self::load(path)?;
        let value = f(&mut store)?;
        store.save(path)?;
        Ok(value)
    }
}
