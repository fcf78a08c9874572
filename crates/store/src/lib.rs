//! Snapshot persistence for the ledger (single local slot).
//!
//! No storage assumptions leak upward: callers talk to [`SnapshotStore`]
//! and pick a backend, either a JSON file under the platform data directory
//! or the in-memory slot for tests/dev.

pub mod in_memory;
pub mod json_file;
pub mod snapshot;

pub use in_memory::InMemoryStore;
pub use json_file::JsonFileStore;
pub use snapshot::{SnapshotStore, StoreError};
