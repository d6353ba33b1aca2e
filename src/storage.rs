//! Durable key-value persistence for client-side state.
//!
//! Every store in this crate persists through one small capability:
//!
//! - [`KvStore`] - raw, fallible string storage by key
//! - [`MemoryStore`] - process-local backend, nothing survives exit
//! - [`FileStore`] - one JSON object file on disk
//! - [`Storage`] - cheap-to-clone handle adding a JSON codec and absorbing
//!   every failure
//!
//! Callers of [`Storage`] never see an error. A failed read looks like a
//! missing key and a failed write is dropped; both are logged.
//!
//! # Examples
//!
//! ```rust
//! use pvo::storage::Storage;
//!
//! let storage = Storage::memory();
//! storage.save("comics-sort-order", &"desc");
//! assert_eq!(storage.load::<String>("comics-sort-order").as_deref(), Some("desc"));
//!
//! storage.remove("comics-sort-order");
//! assert_eq!(storage.load::<String>("comics-sort-order"), None);
//! ```

use parking_lot::Mutex;
use serde::{Serialize, de::DeserializeOwned};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::Result;

/// Raw string storage by key.
///
/// Implementations report failures; [`Storage`] decides what to do with
/// them.
pub trait KvStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

/// In-memory backend.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.entries.lock().remove(key);
        Ok(())
    }
}

/// File-backed store: a single JSON object mapping keys to values.
///
/// The whole map is loaded when the store is opened and rewritten on every
/// change. Writes go to a sibling temporary file that is then renamed over
/// the original, so a crash mid-write leaves the previous contents intact.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

impl FileStore {
    /// Opens the store at `path`. A missing file is an empty store.
    ///
    /// # Errors
    ///
    /// * [`Error::Io`](crate::Error::Io) - If the file exists but cannot be read
    /// * [`Error::Json`](crate::Error::Json) - If the file is not a JSON object of strings
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let entries = match fs::read(&path) {
            Ok(bytes) if bytes.is_empty() => BTreeMap::new(),
            Ok(bytes) => serde_json::from_slice(&bytes)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };

        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    /// Opens the store, starting empty if the existing file is unreadable.
    ///
    /// The unreadable file is left in place until the first write replaces
    /// it.
    pub fn open_or_reset(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        Self::open(path).unwrap_or_else(|e| {
            log::error!("Discarding unreadable storage file {}: {}", path.display(), e);
            Self {
                path: path.to_path_buf(),
                entries: Mutex::new(BTreeMap::new()),
            }
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, serde_json::to_vec_pretty(entries)?)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl KvStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.entries.lock();
        let previous = entries.insert(key.to_string(), value.to_string());
        if let Err(e) = self.flush(&entries) {
            // Keep memory in step with disk.
            match previous {
                Some(old) => entries.insert(key.to_string(), old),
                None => entries.remove(key),
            };
            return Err(e);
        }
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut entries = self.entries.lock();
        if let Some(old) = entries.remove(key) {
            if let Err(e) = self.flush(&entries) {
                entries.insert(key.to_string(), old);
                return Err(e);
            }
        }
        Ok(())
    }
}

/// Error-absorbing JSON handle over a [`KvStore`].
///
/// Clones share the same backend.
#[derive(Clone)]
pub struct Storage {
    backend: Arc<dyn KvStore>,
}

impl fmt::Debug for Storage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Storage").finish_non_exhaustive()
    }
}

impl Storage {
    pub fn new(backend: impl KvStore + 'static) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }

    /// A fresh in-memory storage.
    pub fn memory() -> Self {
        Self::new(MemoryStore::new())
    }

    /// File-backed storage at `path`; see [`FileStore::open_or_reset`].
    pub fn file(path: impl AsRef<Path>) -> Self {
        Self::new(FileStore::open_or_reset(path))
    }

    /// Reads and decodes the value under `key`.
    ///
    /// Returns `None` if the key is absent, the backend fails, or the stored
    /// value does not decode as `T`.
    pub fn load<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.backend.get(key) {
            Ok(raw) => raw?,
            Err(e) => {
                log::error!("Error reading {} from storage: {}", key, e);
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                log::warn!("Ignoring malformed value stored under {}: {}", key, e);
                None
            }
        }
    }

    /// Encodes and writes `value` under `key`. Failures are logged and
    /// dropped.
    pub fn save<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        let raw = match serde_json::to_string(value) {
            Ok(raw) => raw,
            Err(e) => {
                log::error!("Error encoding {} for storage: {}", key, e);
                return;
            }
        };

        if let Err(e) = self.backend.set(key, &raw) {
            log::error!("Error saving {} to storage: {}", key, e);
        }
    }

    /// Deletes `key`. Failures are logged and dropped.
    pub fn remove(&self, key: &str) {
        if let Err(e) = self.backend.remove(key) {
            log::error!("Error removing {} from storage: {}", key, e);
        }
    }
}
