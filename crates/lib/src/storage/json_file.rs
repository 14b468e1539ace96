//! File-backed storage implementation
//!
//! Persists the key-value map as a single JSON object, written through on
//! every mutation. This is the durable analog of the browser's local
//! storage: a fresh process sees whatever the last one wrote.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use super::{Storage, StorageError};
use crate::Result;

/// A store backed by a single JSON file.
///
/// The whole map is loaded once at [`open`](JsonFile::open) and flushed to
/// disk on every `set` and `remove`. An absent file is an empty store; an
/// unreadable or non-JSON file is reported as an error from `open` so the
/// caller can decide whether to discard it.
#[derive(Debug)]
pub struct JsonFile {
    path: PathBuf,
    values: RwLock<HashMap<String, String>>,
}

impl JsonFile {
    /// Opens the store at `path`, loading any previously persisted state.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let values = match fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str(&contents).map_err(|source| {
                StorageError::CorruptStore {
                    path: path.clone(),
                    source,
                }
            })?,
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(source) => return Err(StorageError::ReadFailed { path, source }.into()),
        };
        Ok(Self {
            path,
            values: RwLock::new(values),
        })
    }

    /// The path this store flushes to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self, values: &HashMap<String, String>) -> Result<()> {
        let contents = serde_json::to_string_pretty(values)?;
        fs::write(&self.path, contents).map_err(|source| StorageError::WriteFailed {
            path: self.path.clone(),
            source,
        })?;
        Ok(())
    }
}

impl Storage for JsonFile {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.read().unwrap().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut values = self.values.write().unwrap();
        values.insert(key.to_string(), value.to_string());
        self.flush(&values)
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut values = self.values.write().unwrap();
        if values.remove(key).is_some() {
            self.flush(&values)?;
        }
        Ok(())
    }
}
