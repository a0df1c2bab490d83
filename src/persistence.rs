// Persistence port for the append-only logs (bookings, experiences)
//
// Each log is a JSON array stored under a single key, the same layout the
// browser build keeps in local storage. A missing key reads as an empty log.

use dashmap::DashMap;
use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::io::ErrorKind;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Log '{key}' is not a valid JSON array: {source}")]
    Corrupt {
        key: LogKey,
        #[source]
        source: serde_json::Error,
    },

    #[error("Cannot serialize entry for '{key}': {source}")]
    Serialize {
        key: LogKey,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogKey {
    Bookings,
    Experiences,
}

impl LogKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogKey::Bookings => "bookings",
            LogKey::Experiences => "experiences",
        }
    }
}

impl fmt::Display for LogKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub trait LogStore: Send + Sync + 'static {
    // Every entry of the log, oldest first
    fn load_log(&self, key: LogKey) -> Result<Vec<Value>, StoreError>;

    // Append one entry and return the new log length.
    // The read-modify-write must not interleave with another append to the same key.
    fn append_log(&self, key: LogKey, entry: Value) -> Result<usize, StoreError>;
}

pub fn load_entries<T: DeserializeOwned>(
    store: &dyn LogStore,
    key: LogKey,
) -> Result<Vec<T>, StoreError> {
    store
        .load_log(key)?
        .into_iter()
        .map(|value| serde_json::from_value(value).map_err(|source| StoreError::Corrupt { key, source }))
        .collect()
}

pub fn append_entry<T: Serialize>(
    store: &dyn LogStore,
    key: LogKey,
    entry: &T,
) -> Result<usize, StoreError> {
    let value =
        serde_json::to_value(entry).map_err(|source| StoreError::Serialize { key, source })?;
    store.append_log(key, value)
}

fn parse_log(key: LogKey, raw: &str) -> Result<Vec<Value>, StoreError> {
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(raw).map_err(|source| StoreError::Corrupt { key, source })
}

fn encode_log(key: LogKey, entries: &[Value]) -> Result<String, StoreError> {
    serde_json::to_string(entries).map_err(|source| StoreError::Serialize { key, source })
}

// In-memory store, one raw JSON document per key
#[derive(Default)]
pub struct MemoryLogStore {
    documents: DashMap<LogKey, String>,
}

impl MemoryLogStore {
    pub fn new() -> Self {
        Self::default()
    }

    // Overwrite the raw document behind a key
    pub fn set_raw(&self, key: LogKey, raw: impl Into<String>) {
        self.documents.insert(key, raw.into());
    }
}

impl LogStore for MemoryLogStore {
    fn load_log(&self, key: LogKey) -> Result<Vec<Value>, StoreError> {
        match self.documents.get(&key) {
            Some(raw) => parse_log(key, raw.value()),
            None => Ok(Vec::new()),
        }
    }

    fn append_log(&self, key: LogKey, entry: Value) -> Result<usize, StoreError> {
        // The entry guard holds the shard lock for the whole read-modify-write
        let mut document = self.documents.entry(key).or_default();
        let mut entries = parse_log(key, document.value())?;
        entries.push(entry);
        *document.value_mut() = encode_log(key, &entries)?;
        Ok(entries.len())
    }
}

// One `<key>.json` file per log inside a directory
pub struct FileLogStore {
    dir: PathBuf,
    write_lock: Mutex<()>,
}

impl FileLogStore {
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        tracing::debug!(dir = %dir.display(), "Opened file log store");
        Ok(Self {
            dir,
            write_lock: Mutex::new(()),
        })
    }

    fn path_for(&self, key: LogKey) -> PathBuf {
        self.dir.join(format!("{}.json", key.as_str()))
    }

    fn read_log(&self, key: LogKey) -> Result<Vec<Value>, StoreError> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(raw) => parse_log(key, &raw),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(StoreError::Io(e)),
        }
    }
}

impl LogStore for FileLogStore {
    fn load_log(&self, key: LogKey) -> Result<Vec<Value>, StoreError> {
        self.read_log(key)
    }

    fn append_log(&self, key: LogKey, entry: Value) -> Result<usize, StoreError> {
        let _guard = self.write_lock.lock();
        let mut entries = self.read_log(key)?;
        entries.push(entry);

        // Write beside the target then rename so readers never see a torn file
        let path = self.path_for(key);
        let staging = path.with_extension("json.tmp");
        std::fs::write(&staging, encode_log(key, &entries)?)?;
        std::fs::rename(&staging, &path)?;
        Ok(entries.len())
    }
}
