//! Persistent key-value store used for write-through session state.
//!
//! The session never touches a global store: a [`KeyValueStore`] is injected
//! when the session is opened. Values are JSON so every backend can hold any
//! serializable type.

use crate::error::{Result, SessionError};
use redb::{Database, ReadableTable, TableDefinition};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Store key holding the current repository.
pub const KEY_CURRENT_REPO: &str = "currentRepo";
/// Store key holding the current file URI.
pub const KEY_CURRENT_FILE_ID: &str = "currentFileId";
/// Store key holding the recency map.
pub const KEY_RECENT_OPEN_TIME: &str = "recentOpenTime";
/// Store key holding the ordered tab list.
pub const KEY_TABS: &str = "tabs";
/// Store key holding the sidebar visibility.
pub const KEY_SHOW_SIDE: &str = "showSide";
/// Store key holding the preview visibility.
pub const KEY_SHOW_VIEW: &str = "showView";

const KV_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("kv");

/// A flat string-keyed store of JSON values.
pub trait KeyValueStore {
    /// Reads the raw value under `key`.
    fn get_value(&self, key: &str) -> Result<Option<Value>>;

    /// Writes `value` under `key`, replacing any previous value.
    fn set_value(&mut self, key: &str, value: Value) -> Result<()>;

    /// Lists stored keys, sorted.
    fn keys(&self) -> Result<Vec<String>>;
}

/// Typed access on top of [`KeyValueStore`].
pub trait StoreExt: KeyValueStore {
    /// Reads `key`, falling back to `default` if it is missing or no longer
    /// decodes as `T`.
    fn get<T: DeserializeOwned>(&self, key: &str, default: T) -> Result<T> {
        match self.get_value(key)? {
            None | Some(Value::Null) => Ok(default),
            Some(value) => match serde_json::from_value(value) {
                Ok(v) => Ok(v),
                Err(e) => {
                    warn!(key, error = %e, "Stored value has unexpected shape, using default");
                    Ok(default)
                }
            },
        }
    }

    /// Serializes and writes `value` under `key`.
    fn set<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) -> Result<()> {
        let value =
            serde_json::to_value(value).map_err(|e| SessionError::Serialization(e.to_string()))?;
        self.set_value(key, value)
    }
}

impl<S: KeyValueStore + ?Sized> StoreExt for S {}

/// In-memory store. Nothing survives the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, Value>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_value(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.values.get(key).cloned())
    }

    fn set_value(&mut self, key: &str, value: Value) -> Result<()> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>> {
        let mut keys: Vec<String> = self.values.keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }
}

/// Store backed by a redb database file.
///
/// Every `set_value` commits its own write transaction, so a value is on
/// disk before the call returns.
pub struct RedbStore {
    db: Database,
    path: PathBuf,
}

impl RedbStore {
    /// Opens the database at `path`, creating it if needed.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Store` if the file exists but is not a
    /// database or is held open elsewhere.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let db = Database::create(&path)
            .map_err(|e| store_err("Failed to open session store", e))?;

        // Create the table up front so reads on a fresh store succeed.
        let write_txn = db
            .begin_write()
            .map_err(|e| store_err("Failed to begin write transaction", e))?;
        write_txn
            .open_table(KV_TABLE)
            .map_err(|e| store_err("Failed to open kv table", e))?;
        write_txn
            .commit()
            .map_err(|e| store_err("Failed to commit", e))?;

        Ok(Self { db, path })
    }

    /// Returns the path of the database file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl KeyValueStore for RedbStore {
    fn get_value(&self, key: &str) -> Result<Option<Value>> {
        let read_txn = self
            .db
            .begin_read()
            .map_err(|e| store_err("Failed to begin read transaction", e))?;
        let table = read_txn
            .open_table(KV_TABLE)
            .map_err(|e| store_err("Failed to open kv table", e))?;

        let Some(bytes) = table
            .get(key)
            .map_err(|e| store_err("Failed to read value", e))?
        else {
            return Ok(None);
        };

        match serde_json::from_slice(bytes.value()) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                warn!(key, error = %e, "Corrupted store value, treating as missing");
                Ok(None)
            }
        }
    }

    fn set_value(&mut self, key: &str, value: Value) -> Result<()> {
        let bytes =
            serde_json::to_vec(&value).map_err(|e| SessionError::Serialization(e.to_string()))?;

        let write_txn = self
            .db
            .begin_write()
            .map_err(|e| store_err("Failed to begin write transaction", e))?;
        {
            let mut table = write_txn
                .open_table(KV_TABLE)
                .map_err(|e| store_err("Failed to open kv table", e))?;
            table
                .insert(key, bytes.as_slice())
                .map_err(|e| store_err("Failed to write value", e))?;
        }
        write_txn
            .commit()
            .map_err(|e| store_err("Failed to commit", e))?;

        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>> {
        let read_txn = self
            .db
            .begin_read()
            .map_err(|e| store_err("Failed to begin read transaction", e))?;
        let table = read_txn
            .open_table(KV_TABLE)
            .map_err(|e| store_err("Failed to open kv table", e))?;

        let mut keys = Vec::new();
        for entry in table
            .iter()
            .map_err(|e| store_err("Failed to iterate store", e))?
        {
            let (key, _) = entry.map_err(|e| store_err("Failed to read entry", e))?;
            keys.push(key.value().to_string());
        }
        Ok(keys)
    }
}

fn store_err(context: &str, e: impl std::fmt::Display) -> SessionError {
    SessionError::Store(format!("{}: {}", context, e))
}
