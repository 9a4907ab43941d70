mod record;
mod settings;
mod store;
mod workflow;

pub mod openapi;
pub mod telemetry;

// HTTP transport (requires "http" feature)
#[cfg(feature = "http")]
pub mod http;

pub use record::{InventoryRecord, NewRecord, RecordUpdate};
pub use settings::ServiceConfig;
pub use store::{InMemoryRecordStore, RecordStore, StoreError, StoredRecord};
pub use workflow::{
    parse_timestamp, Clock, FieldSet, FieldValue, InventoryWorkflow, Outcome, RecordPatch,
    WorkflowError, LAST_UPDATED, STOCK_QUANTITY, WAREHOUSE_LOCATION,
};
