use super::{KeyValueStore, StorageError};
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

/// Process-local backend; the terminal fallback in the default stack and the
/// backend of choice in tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    map: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn name(&self) -> &str {
        "memory"
    }

    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        let map = self.map.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(map.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut map = self.map.lock().unwrap_or_else(PoisonError::into_inner);
        map.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
