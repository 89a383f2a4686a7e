mod file;
mod memory;
mod stack;

pub use file::JsonFileStore;
pub use memory::MemoryStore;
pub use stack::StorageStack;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage io: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage encode: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("no storage backend accepted the write for key {key:?}")]
    AllBackendsFailed { key: String },
}

/// One durable key-value backend. Last-write-wins, synchronous,
/// single-process.
pub trait KeyValueStore: Send + Sync {
    fn name(&self) -> &str;

    /// `Ok(None)` means the key has never been written; errors are reserved
    /// for backends that exist but cannot be read.
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn write(&self, key: &str, value: &str) -> Result<(), StorageError>;
}
