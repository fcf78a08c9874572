use std::path::{Path, PathBuf};

use libreta_ledger::Books;

use crate::snapshot::{SnapshotStore, StoreError};

/// File-backed snapshot slot: one JSON blob at a fixed path.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store under the platform data directory
    /// (e.g. `~/.local/share/libreta/books.json` on Linux).
    pub fn in_data_dir() -> Result<Self, StoreError> {
        let dir = dirs::data_dir().ok_or(StoreError::NoDataDir)?;
        Ok(Self::new(dir.join("libreta").join("books.json")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotStore for JsonFileStore {
    fn load(&self) -> Result<Option<Books>, StoreError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(StoreError::Io(err)),
        };
        serde_json::from_str(&raw)
            .map(Some)
            .map_err(StoreError::Corrupt)
    }

    fn save(&self, books: &Books) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let raw = serde_json::to_string(books).map_err(StoreError::Encode)?;
        std::fs::write(&self.path, raw)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use libreta_ledger::{AccountId, BooksCommand, TransferFunds};
    use uuid::Uuid;

    fn books_with_one_transfer() -> Books {
        let mut books = Books::default();
        let event = books
            .handle(&BooksCommand::TransferFunds(TransferFunds {
                from: AccountId::Efectivo,
                to: AccountId::Cheques,
                amount: 400,
                transaction_id: Uuid::now_v7(),
                occurred_at: Utc::now(),
            }))
            .unwrap();
        books.apply(&event);
        books
    }

    #[test]
    fn missing_file_loads_as_no_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("books.json"));
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn snapshot_round_trips_whole() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("books.json"));

        let books = books_with_one_transfer();
        store.save(&books).unwrap();

        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded, books);
    }

    #[test]
    fn load_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("books.json"));
        store.save(&books_with_one_transfer()).unwrap();

        let first = store.load().unwrap().unwrap();
        let second = store.load().unwrap().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn corrupt_blob_is_reported_as_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("books.json");
        std::fs::write(&path, "{not json").unwrap();

        let store = JsonFileStore::new(path);
        match store.load() {
            Err(StoreError::Corrupt(_)) => {}
            other => panic!("Expected Corrupt error, got {other:?}"),
        }
    }

    #[test]
    fn save_creates_missing_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("nested").join("books.json"));
        store.save(&Books::default()).unwrap();
        assert!(store.path().exists());
    }

    #[test]
    fn persisted_layout_uses_the_fixed_field_names() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("books.json"));
        store.save(&books_with_one_transfer()).unwrap();

        let raw = std::fs::read_to_string(store.path()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        for key in ["accounts", "clients", "suppliers", "transactions"] {
            assert!(value.get(key).is_some(), "missing key {key}");
        }
        assert_eq!(value["accounts"].as_array().unwrap().len(), 3);
        assert_eq!(value["accounts"][0]["id"], "EFECTIVO");
        assert_eq!(value["transactions"][0]["type"], "TRANSFER");
        assert_eq!(value["transactions"][0]["source"], "EFECTIVO");
    }
}
