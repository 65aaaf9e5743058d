//! Durable persistence for highlight records.
//!
//! The store owns the identity -> records mapping and is its single source of
//! truth. All mutation goes through [`HighlightStore::append`], which
//! serializes concurrent writers; all reads return owned copies, never live
//! references into shared state.
//!
//! Corruption policy: an unreadable store degrades to "no highlights" instead
//! of failing the caller. Individually malformed records are dropped at load
//! time while the rest of the file survives.

use std::collections::HashMap;
use std::fs;
use std::fs::File;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;

use serde_json::Value;

use crate::article::ArticleIdentity;
use crate::highlight::HighlightRecord;
use crate::highlight::error::{HighlightError, HighlightResult};

/// Persistence contract for highlight records.
///
/// `load` never fails: a missing or corrupt backing medium reads as an empty
/// sequence. `append` must be safe under concurrent callers; two
/// near-simultaneous appends both survive.
pub trait HighlightStore: Send + Sync {
    /// All records for `identity`, in insertion order.
    fn load(&self, identity: &ArticleIdentity) -> Vec<HighlightRecord>;

    /// Add `record` to the end of the identity's sequence, creating the
    /// sequence if absent, and flush to the backing medium before returning.
    fn append(&self, identity: &ArticleIdentity, record: HighlightRecord) -> HighlightResult<()>;
}

/// File-backed store: one JSON document mapping identity keys to record
/// arrays. The whole document is rewritten and fsynced on every append.
pub struct JsonFileStore {
    path: PathBuf,
    /// Serializes the read-modify-write-flush cycle of `append`.
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileStore {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    fn read_all(&self) -> HashMap<String, Vec<HighlightRecord>> {
        match fs::read_to_string(&self.path) {
            Ok(content) => parse_collection(&content),
            Err(_) => HashMap::new(),
        }
    }

    fn write_all(&self, all: &HashMap<String, Vec<HighlightRecord>>) -> HighlightResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| {
                    HighlightError::Store(format!(
                        "failed to create {}: {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
        }
        let json = serde_json::to_string_pretty(all)
            .map_err(|e| HighlightError::Store(format!("failed to serialize: {}", e)))?;
        let mut file = File::create(&self.path).map_err(|e| {
            HighlightError::Store(format!("failed to open {}: {}", self.path.display(), e))
        })?;
        file.write_all(json.as_bytes()).map_err(|e| {
            HighlightError::Store(format!("failed to write {}: {}", self.path.display(), e))
        })?;
        // Flush to disk before reporting success.
        file.sync_all().map_err(|e| {
            HighlightError::Store(format!("failed to flush {}: {}", self.path.display(), e))
        })?;
        Ok(())
    }
}

impl HighlightStore for JsonFileStore {
    fn load(&self, identity: &ArticleIdentity) -> Vec<HighlightRecord> {
        self.read_all()
            .remove(identity.as_str())
            .unwrap_or_default()
    }

    fn append(&self, identity: &ArticleIdentity, record: HighlightRecord) -> HighlightResult<()> {
        let _guard = self
            .write_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let mut all = self.read_all();
        all.entry(identity.as_str().to_string())
            .or_default()
            .push(record);
        self.write_all(&all)
    }
}

/// Parse a persisted collection, dropping whatever does not fit the schema.
fn parse_collection(content: &str) -> HashMap<String, Vec<HighlightRecord>> {
    let root: Value = match serde_json::from_str(content) {
        Ok(value) => value,
        Err(_) => return HashMap::new(),
    };
    let Some(object) = root.as_object() else {
        return HashMap::new();
    };

    let mut all = HashMap::new();
    for (key, value) in object {
        let Some(items) = value.as_array() else {
            continue;
        };
        let records: Vec<HighlightRecord> = items
            .iter()
            .filter_map(|item| serde_json::from_value(item.clone()).ok())
            .filter(|record: &HighlightRecord| !record.text.trim().is_empty())
            .collect();
        if !records.is_empty() {
            all.insert(key.clone(), records);
        }
    }
    all
}

/// In-memory store for tests and ephemeral sessions.
#[derive(Default)]
pub struct MemoryStore {
    records: Mutex<HashMap<String, Vec<HighlightRecord>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }
}

impl HighlightStore for MemoryStore {
    fn load(&self, identity: &ArticleIdentity) -> Vec<HighlightRecord> {
        self.records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(identity.as_str())
            .cloned()
            .unwrap_or_default()
    }

    fn append(&self, identity: &ArticleIdentity, record: HighlightRecord) -> HighlightResult<()> {
        self.records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .entry(identity.as_str().to_string())
            .or_default()
            .push(record);
        Ok(())
    }
}
