use libreta_ledger::Books;
use thiserror::Error;

/// Snapshot store operation error.
///
/// Infrastructure failures only; the domain layer never constructs these.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io failure: {0}")]
    Io(#[from] std::io::Error),

    #[error("snapshot could not be encoded: {0}")]
    Encode(serde_json::Error),

    #[error("stored snapshot is corrupt: {0}")]
    Corrupt(serde_json::Error),

    #[error("no platform data directory available")]
    NoDataDir,

    #[error("store lock poisoned")]
    Poisoned,
}

/// Single-slot, whole-aggregate snapshot persistence.
///
/// `load` distinguishes "nothing persisted yet" (`Ok(None)`) from a slot
/// that exists but cannot be decoded (`Err(Corrupt)`); the caller decides
/// how to degrade. `save` replaces the slot with one serialized blob.
/// There is no partial update: the aggregate is written and read whole.
pub trait SnapshotStore: Send + Sync {
    fn load(&self) -> Result<Option<Books>, StoreError>;
    fn save(&self, books: &Books) -> Result<(), StoreError>;
}
