//! Persisted completion flag storage
//!
//! The onboarding navigator reads a single named flag once at start-up and
//! writes it once when the user finishes. Stores are plain key/value maps of
//! JSON values, in the style of a shared-preferences file.

use crate::error::{Error, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use parking_lot::Mutex;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, warn};

/// Key the completion flag is stored under unless configured otherwise.
pub const DEFAULT_FLAG_KEY: &str = "isIntroShow";

/// Value written under the flag key on completion.
pub const COMPLETED_VALUE: &str = "true";

/// Key holding the completion timestamp for a given flag key.
#[must_use]
pub fn completed_at_key(flag_key: &str) -> String {
    format!("{flag_key}CompletedAt")
}

/// Interpret a stored value as "onboarding completed".
///
/// Absent, `null`, `false` and the empty string mean not completed. Any other
/// value counts as completed.
#[must_use]
pub fn is_completed_value(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(flag)) => *flag,
        Some(Value::String(text)) => !text.is_empty(),
        Some(_) => true,
    }
}

/// A durable key/value store holding the completion flag.
pub trait FlagStore {
    /// Read the raw value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StoreUnavailable`] if the store cannot be read.
    fn read(&self, key: &str) -> Result<Option<Value>>;

    /// Durably record completion under `key` in a single write.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StoreUnavailable`] if the write is not acknowledged.
    fn mark_completed(&mut self, key: &str, at: DateTime<Utc>) -> Result<()>;

    /// Remove the flag under `key` and its timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StoreUnavailable`] if the store cannot be written.
    fn clear(&mut self, key: &str) -> Result<()>;

    /// Whether the flag under `key` marks onboarding as completed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StoreUnavailable`] if the store cannot be read.
    fn is_completed(&self, key: &str) -> Result<bool> {
        Ok(is_completed_value(self.read(key)?.as_ref()))
    }
}

impl<S: FlagStore + ?Sized> FlagStore for &mut S {
    fn read(&self, key: &str) -> Result<Option<Value>> {
        (**self).read(key)
    }

    fn mark_completed(&mut self, key: &str, at: DateTime<Utc>) -> Result<()> {
        (**self).mark_completed(key, at)
    }

    fn clear(&mut self, key: &str) -> Result<()> {
        (**self).clear(key)
    }
}

fn completion_entries(key: &str, at: DateTime<Utc>) -> [(String, Value); 2] {
    [
        (key.to_string(), Value::String(COMPLETED_VALUE.to_string())),
        (
            completed_at_key(key),
            Value::String(at.to_rfc3339_opts(SecondsFormat::Secs, true)),
        ),
    ]
}

/// Flag store backed by a JSON object on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Create a store for the file at `path`. The file is created lazily.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the backing file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_contents(&self) -> Result<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let contents = fs::read_to_string(&self.path).map_err(|e| Error::store(&self.path, e))?;
        Ok((!contents.trim().is_empty()).then_some(contents))
    }

    fn load_map(&self) -> Result<Map<String, Value>> {
        match self.read_contents()? {
            Some(contents) => {
                serde_json::from_str(&contents).map_err(|e| Error::store(&self.path, e))
            }
            None => Ok(Map::new()),
        }
    }

    /// Load the map for rewriting. An unparseable file is replaced rather
    /// than blocking completion forever.
    fn load_map_for_write(&self) -> Result<Map<String, Value>> {
        let Some(contents) = self.read_contents()? else {
            return Ok(Map::new());
        };
        match serde_json::from_str(&contents) {
            Ok(map) => Ok(map),
            Err(e) => {
                warn!("Replacing unparseable flag store {:?}: {}", self.path, e);
                Ok(Map::new())
            }
        }
    }

    fn tmp_path(&self) -> PathBuf {
        let mut tmp_name = self.path.as_os_str().to_owned();
        tmp_name.push(".tmp");
        PathBuf::from(tmp_name)
    }

    /// Write `map` to a synced sibling temp file, then rename it over the
    /// target. Returns only once the rename is durable.
    fn save_map(&self, map: &Map<String, Value>) -> Result<()> {
        let parent = self
            .path
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty());
        if let Some(parent) = parent {
            fs::create_dir_all(parent).map_err(|e| Error::store(parent, e))?;
        }
        let contents = serde_json::to_vec_pretty(map).map_err(|e| Error::store(&self.path, e))?;

        let tmp_path = self.tmp_path();
        let written = File::create(&tmp_path).and_then(|mut file| {
            file.write_all(&contents)?;
            file.sync_all()
        });
        if let Err(e) = written {
            remove_stale(&tmp_path);
            return Err(Error::store(&tmp_path, e));
        }
        if let Err(e) = fs::rename(&tmp_path, &self.path) {
            remove_stale(&tmp_path);
            return Err(Error::store(&self.path, e));
        }
        if let Some(parent) = parent {
            sync_dir(parent).map_err(|e| Error::store(parent, e))?;
        }
        debug!("Saved flag store to {:?}", self.path);
        Ok(())
    }
}

fn remove_stale(tmp_path: &Path) {
    if let Err(e) = fs::remove_file(tmp_path)
        && e.kind() != io::ErrorKind::NotFound
    {
        warn!("Failed to remove temp file {:?}: {}", tmp_path, e);
    }
}

/// Persist a rename by syncing the directory entry.
#[cfg(unix)]
fn sync_dir(dir: &Path) -> io::Result<()> {
    File::open(dir)?.sync_all()
}

#[cfg(not(unix))]
fn sync_dir(_dir: &Path) -> io::Result<()> {
    Ok(())
}

impl FlagStore for JsonFileStore {
    fn read(&self, key: &str) -> Result<Option<Value>> {
        let mut map = self.load_map()?;
        Ok(map.remove(key))
    }

    fn mark_completed(&mut self, key: &str, at: DateTime<Utc>) -> Result<()> {
        let mut map = self.load_map_for_write()?;
        map.extend(completion_entries(key, at));
        self.save_map(&map)
    }

    fn clear(&mut self, key: &str) -> Result<()> {
        if !self.path.exists() {
            return Ok(());
        }
        let mut map = self.load_map_for_write()?;
        let had_flag = map.remove(key).is_some();
        let had_timestamp = map.remove(&completed_at_key(key)).is_some();
        if had_flag || had_timestamp {
            self.save_map(&map)?;
        }
        Ok(())
    }
}

#[derive(Debug, Default)]
struct MemoryState {
    entries: HashMap<String, Value>,
    writes: usize,
    fail_reads: bool,
    fail_writes: bool,
}

/// In-process flag store.
///
/// Clones share the same entries, so a clone handed to one navigator is
/// visible to the next one, as a file would be across a restart.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store with `key` already set to `value`
    #[must_use]
    pub fn with_entry(key: &str, value: Value) -> Self {
        let store = Self::new();
        store.state.lock().entries.insert(key.to_string(), value);
        store
    }

    /// Number of successful `mark_completed`/`clear` writes
    #[must_use]
    pub fn write_count(&self) -> usize {
        self.state.lock().writes
    }

    /// Current raw value under `key`
    #[must_use]
    pub fn get(&self, key: &str) -> Option<Value> {
        self.state.lock().entries.get(key).cloned()
    }

    /// Make subsequent reads fail
    pub fn set_fail_reads(&self, fail: bool) {
        self.state.lock().fail_reads = fail;
    }

    /// Make subsequent writes fail
    pub fn set_fail_writes(&self, fail: bool) {
        self.state.lock().fail_writes = fail;
    }
}

const MEMORY_PATH: &str = "<memory>";

impl FlagStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<Value>> {
        let state = self.state.lock();
        if state.fail_reads {
            return Err(Error::store(MEMORY_PATH, "read failed"));
        }
        Ok(state.entries.get(key).cloned())
    }

    fn mark_completed(&mut self, key: &str, at: DateTime<Utc>) -> Result<()> {
        let mut state = self.state.lock();
        if state.fail_writes {
            return Err(Error::store(MEMORY_PATH, "write failed"));
        }
        state.entries.extend(completion_entries(key, at));
        state.writes += 1;
        Ok(())
    }

    fn clear(&mut self, key: &str) -> Result<()> {
        let mut state = self.state.lock();
        if state.fail_writes {
            return Err(Error::store(MEMORY_PATH, "write failed"));
        }
        state.entries.remove(key);
        state.entries.remove(&completed_at_key(key));
        state.writes += 1;
        Ok(())
    }
}
