//! Result taxonomy returned by workflow write operations.

use thiserror::Error;

use crate::record::InventoryRecord;
use crate::store::StoreError;

/// Successful result of a write operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Created(InventoryRecord),
    Updated(InventoryRecord),
    Deleted(u64),
}

impl Outcome {
    /// The record as it stands after the write, if it still exists.
    pub fn record(&self) -> Option<&InventoryRecord> {
        match self {
            Outcome::Created(record) | Outcome::Updated(record) => Some(record),
            Outcome::Deleted(_) => None,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Outcome::Created(_) => "inventory record created",
            Outcome::Updated(_) => "inventory record updated",
            Outcome::Deleted(_) => "inventory record deleted",
        }
    }

    /// Map this outcome to an HTTP-style status code.
    pub fn status_code(&self) -> u16 {
        match self {
            Outcome::Created(_) => 201,
            Outcome::Updated(_) => 200,
            Outcome::Deleted(_) => 200,
        }
    }
}

/// Rejected result of a workflow operation. No mutation happened.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkflowError {
    /// Input violates a field invariant.
    #[error("validation failed: {0}")]
    Validation(String),

    /// No record is present for this id.
    #[error("inventory record {0} not found")]
    NotFound(u64),

    /// Create was attempted against a present id.
    #[error("inventory record {0} already exists")]
    AlreadyExists(u64),

    /// The record store reported an infrastructure failure.
    #[error("record store failure: {0}")]
    Store(#[from] StoreError),
}

impl WorkflowError {
    /// Map this error to an HTTP-style status code.
    pub fn status_code(&self) -> u16 {
        match self {
            WorkflowError::Validation(_) => 400,
            WorkflowError::NotFound(_) => 404,
            WorkflowError::AlreadyExists(_) => 409,
            WorkflowError::Store(_) => 500,
        }
    }
}
