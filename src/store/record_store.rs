//! RecordStore - abstract keyed storage for inventory rows.

use super::{StoreError, StoredRecord};

/// Keyed storage for inventory rows.
///
/// Calls are synchronous and each is atomic for its own key. Sequences of
/// calls (exists, then save) are not atomic; callers that race on the same
/// id get whatever `save` last wrote.
pub trait RecordStore: Send + Sync {
    /// Get a row by id. Returns `None` if absent.
    fn get_by_id(&self, id: u64) -> Result<Option<StoredRecord>, StoreError>;

    /// Whether a row exists for `id`.
    fn exists_by_id(&self, id: u64) -> Result<bool, StoreError>;

    /// Insert or replace the row keyed by `record.id`.
    fn save(&self, record: StoredRecord) -> Result<StoredRecord, StoreError>;

    /// Remove the row for `id`. Removing an absent id is not an error.
    fn delete_by_id(&self, id: u64) -> Result<(), StoreError>;

    /// All rows in primary-key order.
    fn find_all(&self) -> Result<Vec<StoredRecord>, StoreError>;

    /// Rows whose location contains `location` (case-sensitive).
    fn find_by_location(&self, location: &str) -> Result<Vec<StoredRecord>, StoreError>;

    /// Rows with `min <= stock <= max`.
    fn find_by_stock_range(&self, min: u32, max: u32) -> Result<Vec<StoredRecord>, StoreError>;
}
