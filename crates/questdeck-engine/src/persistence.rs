//! The slot persistence boundary.
//!
//! The ledger persists as a handful of independently-addressable slots,
//! each a JSON-compatible value. Loads are forgiving: an absent or
//! unparsable slot reads as `None` and the caller falls back to its
//! default — a damaged store degrades to first-run state, it never blocks
//! startup. Writes are best-effort: a failed write is logged and accepted,
//! which bounds a crash's data loss to the one in-flight value.

use std::collections::HashMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use log::{debug, warn};
use serde_json::Value;

/// Slot keys. Each key maps to one serialized scalar/array/object.
pub mod keys {
    pub const SAVED_ENTRIES: &str = "saved_entries";
    pub const REVIEWED_INDEX: &str = "reviewed_index";
    pub const XP_TOTAL: &str = "xp_total";
    pub const STREAK_DAYS: &str = "streak_days";
    pub const QUEST_STATE: &str = "quest_state";
    pub const RUNNER_HIGH_SCORE: &str = "runner_high_score";
}

/// A keyed store of durable JSON values.
pub trait SlotStore {
    /// Read a slot. Absent or unparsable slots read as `None`.
    fn load(&self, key: &str) -> Option<Value>;

    /// Write a slot. Best-effort — returns whether the backend accepted
    /// the value.
    fn store(&self, key: &str, value: &Value) -> bool;
}

impl<T: SlotStore + ?Sized> SlotStore for &T {
    fn load(&self, key: &str) -> Option<Value> {
        (**self).load(key)
    }

    fn store(&self, key: &str, value: &Value) -> bool {
        (**self).store(key, value)
    }
}

/// File-backed store: one `<key>.json` per slot under a directory.
///
/// Writes go through a temp file in the same directory followed by a
/// rename, so a crash mid-write can corrupt nothing — the slot either
/// holds the old value or the new one.
#[derive(Debug)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Open (creating if needed) a slot directory.
    pub fn open(dir: impl Into<PathBuf>) -> io::Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn slot_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    fn write_atomic(&self, path: &Path, bytes: &[u8]) -> io::Result<()> {
        let mut tmp = tempfile::NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(bytes)?;
        tmp.as_file().sync_all()?;
        tmp.persist(path).map_err(|e| e.error)?;
        Ok(())
    }
}

impl SlotStore for JsonFileStore {
    fn load(&self, key: &str) -> Option<Value> {
        let path = self.slot_path(key);
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) => {
                if e.kind() != io::ErrorKind::NotFound {
                    debug!("slot {key}: unreadable ({e}), treating as absent");
                }
                return None;
            }
        };
        match serde_json::from_slice(&bytes) {
            Ok(value) => Some(value),
            Err(e) => {
                debug!("slot {key}: malformed payload ({e}), treating as absent");
                None
            }
        }
    }

    fn store(&self, key: &str, value: &Value) -> bool {
        let bytes = match serde_json::to_vec(value) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!("slot {key}: serialize failed ({e}), value dropped");
                return false;
            }
        };
        match self.write_atomic(&self.slot_path(key), &bytes) {
            Ok(()) => true,
            Err(e) => {
                warn!("slot {key}: write failed ({e}), value dropped");
                false
            }
        }
    }
}

/// In-memory store, for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    slots: Mutex<HashMap<String, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SlotStore for MemoryStore {
    fn load(&self, key: &str) -> Option<Value> {
        let Ok(slots) = self.slots.lock() else {
            return None;
        };
        slots.get(key).cloned()
    }

    fn store(&self, key: &str, value: &Value) -> bool {
        let Ok(mut slots) = self.slots.lock() else {
            return false;
        };
        slots.insert(key.to_string(), value.clone());
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn memory_store_roundtrip() {
        let store = MemoryStore::new();
        assert_eq!(store.load(keys::XP_TOTAL), None);
        assert!(store.store(keys::XP_TOTAL, &json!(120)));
        assert_eq!(store.load(keys::XP_TOTAL), Some(json!(120)));
    }

    #[test]
    fn file_store_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open(dir.path()).unwrap();
        assert!(store.store(keys::SAVED_ENTRIES, &json!(["a", "b"])));
        assert_eq!(store.load(keys::SAVED_ENTRIES), Some(json!(["a", "b"])));
    }

    #[test]
    fn file_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        {
            let store = JsonFileStore::open(dir.path()).unwrap();
            store.store(keys::STREAK_DAYS, &json!(4));
        }
        let store = JsonFileStore::open(dir.path()).unwrap();
        assert_eq!(store.load(keys::STREAK_DAYS), Some(json!(4)));
    }

    #[test]
    fn malformed_slot_reads_as_absent() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open(dir.path()).unwrap();
        fs::write(dir.path().join("xp_total.json"), b"{not json").unwrap();
        assert_eq!(store.load(keys::XP_TOTAL), None);
    }

    #[test]
    fn missing_slot_reads_as_absent() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open(dir.path()).unwrap();
        assert_eq!(store.load(keys::QUEST_STATE), None);
    }

    #[test]
    fn overwrite_replaces_value() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open(dir.path()).unwrap();
        store.store(keys::REVIEWED_INDEX, &json!(1));
        store.store(keys::REVIEWED_INDEX, &json!(2));
        assert_eq!(store.load(keys::REVIEWED_INDEX), Some(json!(2)));
    }
}
