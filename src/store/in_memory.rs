//! InMemoryRecordStore - BTreeMap-backed record store for testing and development.

use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use super::{RecordStore, StoreError, StoredRecord};

/// In-memory record store backed by a `BTreeMap`, so listings come back in
/// primary-key order. Clone-friendly via Arc.
#[derive(Clone, Default)]
pub struct InMemoryRecordStore {
    storage: Arc<RwLock<BTreeMap<u64, StoredRecord>>>,
}

impl InMemoryRecordStore {
    /// Create a new empty record store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of rows currently held.
    pub fn len(&self) -> Result<usize, StoreError> {
        let storage = self
            .storage
            .read()
            .map_err(|_| StoreError::LockPoisoned("len"))?;
        Ok(storage.len())
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }

    fn find(
        &self,
        operation: &'static str,
        predicate: impl Fn(&StoredRecord) -> bool,
    ) -> Result<Vec<StoredRecord>, StoreError> {
        let storage = self
            .storage
            .read()
            .map_err(|_| StoreError::LockPoisoned(operation))?;

        Ok(storage
            .values()
            .filter(|record| predicate(record))
            .cloned()
            .collect())
    }
}

impl RecordStore for InMemoryRecordStore {
    fn get_by_id(&self, id: u64) -> Result<Option<StoredRecord>, StoreError> {
        let storage = self
            .storage
            .read()
            .map_err(|_| StoreError::LockPoisoned("get"))?;
        Ok(storage.get(&id).cloned())
    }

    fn exists_by_id(&self, id: u64) -> Result<bool, StoreError> {
        let storage = self
            .storage
            .read()
            .map_err(|_| StoreError::LockPoisoned("exists"))?;
        Ok(storage.contains_key(&id))
    }

    fn save(&self, record: StoredRecord) -> Result<StoredRecord, StoreError> {
        let mut storage = self
            .storage
            .write()
            .map_err(|_| StoreError::LockPoisoned("save"))?;
        storage.insert(record.id, record.clone());
        Ok(record)
    }

    fn delete_by_id(&self, id: u64) -> Result<(), StoreError> {
        let mut storage = self
            .storage
            .write()
            .map_err(|_| StoreError::LockPoisoned("delete"))?;
        storage.remove(&id);
        Ok(())
    }

    fn find_all(&self) -> Result<Vec<StoredRecord>, StoreError> {
        self.find("find_all", |_| true)
    }

    fn find_by_location(&self, location: &str) -> Result<Vec<StoredRecord>, StoreError> {
        self.find("find_by_location", |r| r.location.contains(location))
    }

    fn find_by_stock_range(&self, min: u32, max: u32) -> Result<Vec<StoredRecord>, StoreError> {
        self.find("find_by_stock_range", |r| (min..=max).contains(&r.stock))
    }
}
