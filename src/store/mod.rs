//! Record store - keyed persistence for inventory rows.
//!
//! The workflow talks to storage only through [`RecordStore`]. Rows are kept
//! in their storage shape ([`StoredRecord`]); mapping to and from the domain
//! record happens in the workflow, so a store knows nothing about
//! validation rules.
//!
//! ## Example
//!
//! ```
//! use chrono::Utc;
//! use inventory_service::{InMemoryRecordStore, RecordStore, StoredRecord};
//!
//! let store = InMemoryRecordStore::new();
//! store.save(StoredRecord {
//!     id: 1,
//!     stock: 10,
//!     location: "BODEGA-A".into(),
//!     updated_at: Utc::now(),
//! })?;
//! assert!(store.exists_by_id(1)?);
//! # Ok::<(), inventory_service::StoreError>(())
//! ```

mod in_memory;
mod record_store;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One persisted inventory row, keyed by `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredRecord {
    pub id: u64,
    pub stock: u32,
    pub location: String,
    pub updated_at: DateTime<Utc>,
}

/// Infrastructure failure reported by a record store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// A lock guarding the storage was poisoned by a panicking writer.
    #[error("record store lock poisoned during {0}")]
    LockPoisoned(&'static str),

    /// The backing storage could not be reached.
    #[error("record store unavailable: {0}")]
    Unavailable(String),

    /// The backing storage refused the write.
    #[error("record store constraint violated: {0}")]
    Constraint(String),
}

pub use in_memory::InMemoryRecordStore;
pub use record_store::RecordStore;
