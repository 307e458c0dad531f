//! Durable storage slots.
//!
//! A slot is one named JSON file holding a serializable snapshot of a single
//! store's state, the crate's equivalent of one browser storage key. Slots
//! are read once at startup (hydration) and overwritten on every mutation.
//! Writes are atomic (write-to-temp + rename) so a crash never leaves a
//! corrupt snapshot behind; a reload after an unclean shutdown sees the last
//! committed state.
//!
//! # Performance Characteristics
//!
//! - **Read**: O(1), loads the entire file into memory once
//! - **Write**: O(n), serializes and writes the entire snapshot
//! - **Best for**: small collections, infrequent writes

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::domain::error::{OpsdeckError, Result};

/// One named durable slot backed by a JSON file.
///
/// # Examples
///
/// ```no_run
/// use opsdeck::storage::JsonSlot;
///
/// let slot = JsonSlot::open("/tmp/opsdeck", "users-storage")?;
/// let snapshot: Option<Vec<u64>> = slot.read()?;
/// # Ok::<(), opsdeck::domain::OpsdeckError>(())
/// ```
#[derive(Debug, Clone)]
pub struct JsonSlot {
    file_path: PathBuf,
}

impl JsonSlot {
    /// Opens the slot named `name` inside `data_dir`.
    ///
    /// Parent directories are created eagerly so the first write cannot fail
    /// on a missing path. The backing file is `{data_dir}/{name}.json`.
    ///
    /// # Errors
    ///
    /// Returns an error if the data directory cannot be created.
    pub fn open(data_dir: impl AsRef<Path>, name: &str) -> Result<Self> {
        let data_dir = data_dir.as_ref();
        std::fs::create_dir_all(data_dir)?;
        let file_path = data_dir.join(format!("{name}.json"));
        tracing::debug!(path = ?file_path, "opened storage slot");
        Ok(Self { file_path })
    }

    /// Reads and deserializes the snapshot, if one exists.
    ///
    /// Returns `Ok(None)` when the slot has never been written.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or contains
    /// invalid JSON.
    pub fn read<T: DeserializeOwned>(&self) -> Result<Option<T>> {
        if !self.file_path.exists() {
            tracing::debug!(path = ?self.file_path, "slot empty, nothing to hydrate");
            return Ok(None);
        }

        let contents = std::fs::read_to_string(&self.file_path)?;
        let snapshot = serde_json::from_str(&contents).map_err(|e| {
            OpsdeckError::Storage(format!(
                "failed to parse snapshot {}: {e}",
                self.file_path.display()
            ))
        })?;
        Ok(Some(snapshot))
    }

    /// Serializes and persists a snapshot atomically.
    ///
    /// Writes to a temporary sibling file first, then renames it over the
    /// target path, so readers never observe a half-written snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization, the temporary write, or the rename
    /// fails.
    pub fn write<T: Serialize>(&self, snapshot: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(snapshot).map_err(|e| {
            OpsdeckError::Storage(format!("failed to serialize snapshot: {e}"))
        })?;

        let tmp_path = self.file_path.with_extension("tmp");
        std::fs::write(&tmp_path, json)?;
        std::fs::rename(&tmp_path, &self.file_path)?;

        tracing::trace!(path = ?self.file_path, "snapshot persisted");
        Ok(())
    }

    /// The path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.file_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use tempfile::TempDir;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Snapshot {
        version: u32,
        items: Vec<String>,
    }

    #[test]
    fn unwritten_slot_reads_none() {
        let dir = TempDir::new().unwrap();
        let slot = JsonSlot::open(dir.path(), "empty").unwrap();
        let snapshot: Option<Snapshot> = slot.read().unwrap();
        assert!(snapshot.is_none());
    }

    #[test]
    fn write_then_read_round_trips() {
        let dir = TempDir::new().unwrap();
        let slot = JsonSlot::open(dir.path(), "users-storage").unwrap();
        let snapshot = Snapshot {
            version: 1,
            items: vec!["a".to_string(), "b".to_string()],
        };

        slot.write(&snapshot).unwrap();
        assert_eq!(slot.read::<Snapshot>().unwrap(), Some(snapshot));
    }

    #[test]
    fn write_overwrites_previous_snapshot() {
        let dir = TempDir::new().unwrap();
        let slot = JsonSlot::open(dir.path(), "theme-storage").unwrap();

        slot.write(&Snapshot { version: 1, items: vec!["old".to_string()] })
            .unwrap();
        slot.write(&Snapshot { version: 1, items: vec!["new".to_string()] })
            .unwrap();

        let read: Snapshot = slot.read().unwrap().unwrap();
        assert_eq!(read.items, vec!["new".to_string()]);
    }

    #[test]
    fn corrupt_snapshot_is_a_storage_error() {
        let dir = TempDir::new().unwrap();
        let slot = JsonSlot::open(dir.path(), "broken").unwrap();
        std::fs::write(slot.path(), "{ not json").unwrap();

        assert!(slot.read::<Snapshot>().is_err());
    }
}
