use std::collections::HashMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use log::{info, warn};
use tempfile::NamedTempFile;

use crate::model::task::TaskList;

/// Name of the store directory looked up from the working directory
pub const STORE_DIR_NAME: &str = ".todo";

/// Error type for store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("could not read {path}: {source}")]
    ReadError { path: PathBuf, source: io::Error },
    #[error("could not write {path}: {source}")]
    WriteError { path: PathBuf, source: io::Error },
    #[error("invalid store key '{0}'")]
    InvalidKey(String),
    #[error("could not serialize task list: {0}")]
    SerializeError(#[from] serde_json::Error),
}

/// String key/value storage the task list is persisted into
pub trait KeyValueStore {
    /// Value stored under `key`, if any
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

// ---------------------------------------------------------------------------
// File-backed store
// ---------------------------------------------------------------------------

/// One file per key: `<dir>/<key>.json`
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileStore { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn key_path(&self, key: &str) -> Result<PathBuf, StoreError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(StoreError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.key_path(key)?;
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::ReadError { path, source: e }),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.key_path(key)?;
        fs::create_dir_all(&self.dir).map_err(|e| StoreError::WriteError {
            path: self.dir.clone(),
            source: e,
        })?;
        atomic_write(&path, value.as_bytes())
            .map_err(|e| StoreError::WriteError { path, source: e })
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        let path = self.key_path(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::WriteError { path, source: e }),
        }
    }
}

/// Write `content` to `path` atomically using a temp file + rename.
pub fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let dir = path.parent().unwrap_or(Path::new("."));
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// In-memory store
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.entries.remove(key);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Task list marshalling
// ---------------------------------------------------------------------------

/// Load the task list stored under `key`.
///
/// A missing, unreadable, or malformed entry yields an empty list.
pub fn load_tasks(store: &dyn KeyValueStore, key: &str) -> TaskList {
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            info!("event=store_load module=store status=empty key={}", key);
            return TaskList::new();
        }
        Err(e) => {
            warn!("event=store_load module=store status=error key={} error=\"{}\"", key, e);
            return TaskList::new();
        }
    };
    match serde_json::from_str::<TaskList>(&raw) {
        Ok(list) => {
            info!(
                "event=store_load module=store status=ok key={} tasks={}",
                key,
                list.len()
            );
            list
        }
        Err(e) => {
            warn!(
                "event=store_load module=store status=malformed key={} error=\"{}\"",
                key, e
            );
            TaskList::new()
        }
    }
}

/// Serialize the whole task list under `key`.
pub fn save_tasks(
    store: &mut dyn KeyValueStore,
    key: &str,
    list: &TaskList,
) -> Result<(), StoreError> {
    let value = serde_json::to_string(list)?;
    store.set(key, &value)?;
    info!(
        "event=store_save module=store status=ok key={} tasks={}",
        key,
        list.len()
    );
    Ok(())
}

/// The explicit store directory if given, otherwise one discovered from the
/// working directory.
pub fn resolve_store_dir(store_dir: Option<&Path>) -> io::Result<PathBuf> {
    match store_dir {
        Some(dir) => Ok(dir.to_path_buf()),
        None => Ok(discover_store_dir(&std::env::current_dir()?)),
    }
}

/// Find the store directory by walking up from `start`, looking for a
/// `.todo/` directory. Falls back to `<start>/.todo`.
pub fn discover_store_dir(start: &Path) -> PathBuf {
    let mut current = start.to_path_buf();
    loop {
        let candidate = current.join(STORE_DIR_NAME);
        if candidate.is_dir() {
            return candidate;
        }
        if !current.pop() {
            return start.join(STORE_DIR_NAME);
        }
    }
}
