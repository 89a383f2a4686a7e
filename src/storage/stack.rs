use super::{JsonFileStore, KeyValueStore, MemoryStore, StorageError};
use log::{error, trace, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Ordered chain of key-value backends. Reads take the first backend that
/// yields a value; writes go to every backend so the durable copy and any
/// fallback stay in step.
pub struct StorageStack {
    backends: Vec<Box<dyn KeyValueStore>>,
}

impl std::fmt::Debug for StorageStack {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.backends.iter().map(|b| b.name()).collect();
        write!(f, "StorageStack({})", names.join(" -> "))
    }
}

impl StorageStack {
    pub fn new(backends: Vec<Box<dyn KeyValueStore>>) -> Self {
        Self { backends }
    }

    /// File store in the user data directory, backed by a memory store when
    /// the platform offers no data directory.
    pub fn default_stack() -> Self {
        let mut backends: Vec<Box<dyn KeyValueStore>> = Vec::new();
        if let Some(store) = JsonFileStore::in_user_data_dir() {
            backends.push(Box::new(store));
        }
        backends.push(Box::new(MemoryStore::new()));
        Self::new(backends)
    }

    pub fn in_memory() -> Self {
        Self::new(vec![Box::new(MemoryStore::new())])
    }

    pub fn read(&self, key: &str) -> Option<String> {
        for backend in &self.backends {
            match backend.read(key) {
                Ok(Some(value)) => {
                    trace!(target: "storage", "Read {:?} from {} backend", key, backend.name());
                    return Some(value);
                }
                Ok(None) => continue,
                Err(e) => {
                    warn!(
                        target: "storage",
                        "Backend {} failed reading {:?}, trying next: {}",
                        backend.name(), key, e
                    );
                }
            }
        }
        None
    }

    pub fn write(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut wrote = false;
        for backend in &self.backends {
            match backend.write(key, value) {
                Ok(()) => wrote = true,
                Err(e) => {
                    error!(
                        target: "storage",
                        "Backend {} failed writing {:?}: {}",
                        backend.name(), key, e
                    );
                }
            }
        }
        if wrote {
            Ok(())
        } else {
            Err(StorageError::AllBackendsFailed {
                key: key.to_string(),
            })
        }
    }

    /// Typed read. A value that fails to decode is logged and treated as
    /// absent so corrupt state never blocks startup.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.read(key)?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(
                    target: "storage",
                    "Discarding corrupt persisted value for {:?}: {}",
                    key, e
                );
                None
            }
        }
    }

    pub fn put<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let raw = serde_json::to_string(value)?;
        self.write(key, &raw)
    }
}
