use crate::model::SessionRecord;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SyncError {
    #[error("not authenticated")]
    NotAuthenticated,
    #[error("network error: {0}")]
    Network(String),
    #[error("server rejected request: {0}")]
    Rejected(String),
}

/// Capability contract for the hosted backend. The engine hands finished
/// records out and merges whatever comes back; it never retries or resolves
/// conflicts — local history stays authoritative on any failure.
pub trait SyncService {
    fn upload(&self, record: &SessionRecord) -> Result<(), SyncError>;

    fn download_all(&self) -> Result<Vec<SessionRecord>, SyncError>;
}
