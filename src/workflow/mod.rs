//! Inventory workflow - the decision logic over a [`RecordStore`].
//!
//! Every operation works on a single record and runs to completion on the
//! caller's thread. Write operations return `Result<Outcome, WorkflowError>`;
//! list and search operations fail open and return an empty `Vec` when the
//! store reports a fault.
//!
//! ## Example
//!
//! ```
//! use inventory_service::{InMemoryRecordStore, InventoryWorkflow, NewRecord, RecordUpdate};
//!
//! let workflow = InventoryWorkflow::new(InMemoryRecordStore::new());
//! workflow.create(NewRecord::new(1, 100, "BODEGA-A"))?;
//! workflow.update_stock_only(1, RecordUpdate::new(50, "IGNORED"))?;
//!
//! let record = workflow.get(1)?;
//! assert_eq!(record.stock_quantity, 50);
//! assert_eq!(record.warehouse_location, "BODEGA-A");
//! # Ok::<(), inventory_service::WorkflowError>(())
//! ```

mod outcome;
mod patch;

use chrono::{DateTime, Utc};
use tracing::{debug, info, instrument, warn};

use crate::record::{
    validate_id, validate_location, validate_stock, InventoryRecord, NewRecord, RecordUpdate,
};
use crate::store::{RecordStore, StoreError, StoredRecord};

pub use outcome::{Outcome, WorkflowError};
pub use patch::{
    parse_timestamp, FieldSet, FieldValue, RecordPatch, LAST_UPDATED, STOCK_QUANTITY,
    WAREHOUSE_LOCATION,
};

/// Source of "now" for timestamp stamping.
pub type Clock = fn() -> DateTime<Utc>;

/// Stateless service layer over a record store.
///
/// The store is injected at construction; the workflow holds no other state
/// between calls.
pub struct InventoryWorkflow<S> {
    store: S,
    clock: Clock,
}

impl<S: RecordStore> InventoryWorkflow<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            clock: Utc::now,
        }
    }

    /// Replace the clock used to stamp `last_updated`.
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Get a reference to the store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Create a record if its id is not yet present.
    ///
    /// Rejects `id == 0`, negative stock and a blank location with
    /// [`WorkflowError::Validation`]. A caller-supplied timestamp is kept,
    /// otherwise the record is stamped with the current time.
    #[instrument(skip(self, record), fields(id = record.id))]
    pub fn create(&self, record: NewRecord) -> Result<Outcome, WorkflowError> {
        let id = validate_id(record.id).map_err(WorkflowError::Validation)?;
        let stock = validate_stock(record.stock_quantity).map_err(WorkflowError::Validation)?;
        let location =
            validate_location(&record.warehouse_location).map_err(WorkflowError::Validation)?;

        if self.store.exists_by_id(id)? {
            debug!("record already present");
            return Err(WorkflowError::AlreadyExists(id));
        }

        let saved = self.store.save(StoredRecord {
            id,
            stock,
            location,
            updated_at: record.last_updated.unwrap_or_else(self.clock),
        })?;
        info!(stock = saved.stock, "inventory record created");
        Ok(Outcome::Created(saved.into()))
    }

    /// Point lookup by id.
    pub fn get(&self, id: u64) -> Result<InventoryRecord, WorkflowError> {
        self.store
            .get_by_id(id)?
            .map(InventoryRecord::from)
            .ok_or(WorkflowError::NotFound(id))
    }

    /// Replace stock and location, stamping the timestamp to now.
    #[instrument(skip(self, update))]
    pub fn update_full(&self, id: u64, update: RecordUpdate) -> Result<Outcome, WorkflowError> {
        let stock = validate_stock(update.stock_quantity).map_err(WorkflowError::Validation)?;
        let location =
            validate_location(&update.warehouse_location).map_err(WorkflowError::Validation)?;

        self.modify(id, |row| {
            row.stock = stock;
            row.location = location;
        })
    }

    /// Replace only the stock figure. Any location in `update` is ignored.
    #[instrument(skip(self, update))]
    pub fn update_stock_only(
        &self,
        id: u64,
        update: RecordUpdate,
    ) -> Result<Outcome, WorkflowError> {
        let stock = validate_stock(update.stock_quantity).map_err(WorkflowError::Validation)?;

        self.modify(id, |row| row.stock = stock)
    }

    /// Apply the fields present in `field_set`.
    ///
    /// The whole set is validated before the record is touched; the first
    /// invalid field rejects the update and nothing is written. Without an
    /// explicit `lastUpdated` the record is stamped with the current time.
    #[instrument(skip(self, field_set), fields(field_count = field_set.len()))]
    pub fn update_partial(
        &self,
        id: u64,
        field_set: &FieldSet,
    ) -> Result<Outcome, WorkflowError> {
        let patch = RecordPatch::try_from(field_set).map_err(WorkflowError::Validation)?;

        self.modify(id, |row| {
            if let Some(stock) = patch.stock {
                row.stock = stock;
            }
            if let Some(location) = patch.location {
                row.location = location;
            }
            if let Some(at) = patch.last_updated {
                row.updated_at = at;
            }
        })
    }

    /// Remove a present record.
    #[instrument(skip(self))]
    pub fn delete(&self, id: u64) -> Result<Outcome, WorkflowError> {
        if !self.store.exists_by_id(id)? {
            debug!("record not found");
            return Err(WorkflowError::NotFound(id));
        }
        self.store.delete_by_id(id)?;
        info!("inventory record deleted");
        Ok(Outcome::Deleted(id))
    }

    /// Every record in store order. Empty on a store fault.
    pub fn list_all(&self) -> Vec<InventoryRecord> {
        fail_open("list_all", self.store.find_all())
    }

    /// Records whose location matches `location`. Empty on a store fault.
    pub fn find_by_location(&self, location: &str) -> Vec<InventoryRecord> {
        fail_open("find_by_location", self.store.find_by_location(location))
    }

    /// Records with `min <= stock <= max`.
    ///
    /// A negative bound or `min > max` yields an empty result, never an error.
    pub fn find_by_stock_range(&self, min: i64, max: i64) -> Vec<InventoryRecord> {
        if min < 0 || max < 0 || min > max {
            debug!(min, max, "rejecting invalid stock range");
            return Vec::new();
        }
        let Ok(min) = u32::try_from(min) else {
            return Vec::new();
        };
        let max = u32::try_from(max).unwrap_or(u32::MAX);
        fail_open(
            "find_by_stock_range",
            self.store.find_by_stock_range(min, max),
        )
    }

    /// Whether the record exists and holds at least `required` units.
    ///
    /// A missing record, insufficient stock and a store fault all give `false`.
    pub fn check_stock_sufficient(&self, id: u64, required: u32) -> bool {
        match self.store.get_by_id(id) {
            Ok(Some(row)) => row.stock >= required,
            Ok(None) => false,
            Err(e) => {
                warn!(id, error = %e, "stock check failed");
                false
            }
        }
    }

    /// Load a present record, apply `change`, stamp it and save it.
    fn modify(
        &self,
        id: u64,
        change: impl FnOnce(&mut StoredRecord),
    ) -> Result<Outcome, WorkflowError> {
        let mut row = self
            .store
            .get_by_id(id)?
            .ok_or(WorkflowError::NotFound(id))?;

        row.updated_at = (self.clock)();
        change(&mut row);

        let saved = self.store.save(row)?;
        info!(stock = saved.stock, "inventory record updated");
        Ok(Outcome::Updated(saved.into()))
    }
}

fn fail_open(
    operation: &'static str,
    rows: Result<Vec<StoredRecord>, StoreError>,
) -> Vec<InventoryRecord> {
    match rows {
        Ok(rows) => rows.into_iter().map(InventoryRecord::from).collect(),
        Err(e) => {
            warn!(operation, error = %e, "read failed, returning empty result");
            Vec::new()
        }
    }
}

impl From<StoredRecord> for InventoryRecord {
    fn from(row: StoredRecord) -> Self {
        Self {
            id: row.id,
            stock_quantity: row.stock,
            warehouse_location: row.location,
            last_updated: row.updated_at,
        }
    }
}
