use std::sync::RwLock;

use libreta_ledger::Books;

use crate::snapshot::{SnapshotStore, StoreError};

/// In-memory snapshot slot.
///
/// Intended for tests/dev. Holds the serialized blob rather than the
/// aggregate itself, so load/save exercise the same codec as the file
/// store.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    slot: RwLock<Option<String>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Slot pre-filled with a raw blob (e.g. a corrupt one, for degraded
    /// startup tests).
    pub fn seeded(raw: impl Into<String>) -> Self {
        Self {
            slot: RwLock::new(Some(raw.into())),
        }
    }

    /// Current raw blob, if any.
    pub fn raw(&self) -> Option<String> {
        self.slot.read().ok().and_then(|slot| slot.clone())
    }
}

impl SnapshotStore for InMemoryStore {
    fn load(&self) -> Result<Option<Books>, StoreError> {
        let slot = self.slot.read().map_err(|_| StoreError::Poisoned)?;
        match slot.as_deref() {
            None => Ok(None),
            Some(raw) => serde_json::from_str(raw)
                .map(Some)
                .map_err(StoreError::Corrupt),
        }
    }

    fn save(&self, books: &Books) -> Result<(), StoreError> {
        let raw = serde_json::to_string(books).map_err(StoreError::Encode)?;
        let mut slot = self.slot.write().map_err(|_| StoreError::Poisoned)?;
        *slot = Some(raw);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_slot_loads_as_no_snapshot() {
        let store = InMemoryStore::new();
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn snapshot_round_trips_whole() {
        let store = InMemoryStore::new();
        let books = Books::default();
        store.save(&books).unwrap();
        assert_eq!(store.load().unwrap().unwrap(), books);
    }

    #[test]
    fn seeded_garbage_is_reported_as_corrupt() {
        let store = InMemoryStore::seeded("][");
        match store.load() {
            Err(StoreError::Corrupt(_)) => {}
            other => panic!("Expected Corrupt error, got {other:?}"),
        }
    }

    #[test]
    fn save_replaces_the_slot_whole() {
        let store = InMemoryStore::new();
        store.save(&Books::default()).unwrap();
        let first = store.raw().unwrap();
        store.save(&Books::default()).unwrap();
        assert_eq!(store.raw().unwrap(), first);
    }
}
