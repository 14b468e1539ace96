//! In-memory storage implementation
//!
//! A `HashMap` behind a read-write lock. Nothing survives the process, which
//! makes it the store of choice for tests and for hosts that handle
//! durability themselves.

use std::collections::HashMap;
use std::sync::RwLock;

use super::Storage;
use crate::Result;

/// A simple in-memory store using a `HashMap`.
#[derive(Debug, Default)]
pub struct InMemory {
    values: RwLock<HashMap<String, String>>,
}

impl InMemory {
    /// Creates a new, empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the keys currently present, mainly useful in tests.
    pub fn keys(&self) -> Vec<String> {
        let values = self.values.read().unwrap();
        values.keys().cloned().collect()
    }
}

impl Storage for InMemory {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.read().unwrap().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.values
            .write()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.values.write().unwrap().remove(key);
        Ok(())
    }
}
