//! Inventory records and the payloads that create or replace them.
//!
//! `InventoryRecord` is the domain shape handed to callers. Payloads carry
//! stock as `i64` so that negative input reaches validation instead of being
//! rejected by the decoder with an opaque message.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Current stock state of one inventory item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryRecord {
    pub id: u64,
    pub stock_quantity: u32,
    pub warehouse_location: String,
    pub last_updated: DateTime<Utc>,
}

/// Payload for creating a record. The caller assigns the id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRecord {
    pub id: u64,
    pub stock_quantity: i64,
    /// Absent or `null` decodes to empty and is rejected by validation.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub warehouse_location: String,
    /// Stamped to "now" when absent.
    #[serde(default)]
    pub last_updated: Option<DateTime<Utc>>,
}

impl NewRecord {
    pub fn new(id: u64, stock_quantity: i64, warehouse_location: impl Into<String>) -> Self {
        Self {
            id,
            stock_quantity,
            warehouse_location: warehouse_location.into(),
            last_updated: None,
        }
    }

    pub fn with_last_updated(mut self, at: DateTime<Utc>) -> Self {
        self.last_updated = Some(at);
        self
    }
}

/// Payload for full and stock-only updates.
///
/// Any timestamp in the incoming body is dropped by the decoder; update
/// timestamps are always assigned by the workflow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordUpdate {
    pub stock_quantity: i64,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub warehouse_location: String,
}

impl RecordUpdate {
    pub fn new(stock_quantity: i64, warehouse_location: impl Into<String>) -> Self {
        Self {
            stock_quantity,
            warehouse_location: warehouse_location.into(),
        }
    }

    /// An update that only carries a stock figure.
    pub fn stock(stock_quantity: i64) -> Self {
        Self::new(stock_quantity, String::new())
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

pub(crate) fn validate_id(id: u64) -> Result<u64, String> {
    if id == 0 {
        return Err("id must be a positive integer".into());
    }
    Ok(id)
}

pub(crate) fn validate_stock(stock: i64) -> Result<u32, String> {
    if stock < 0 {
        return Err(format!("stockQuantity must not be negative (got {})", stock));
    }
    u32::try_from(stock).map_err(|_| format!("stockQuantity is out of range (got {})", stock))
}

pub(crate) fn validate_location(location: &str) -> Result<String, String> {
    let trimmed = location.trim();
    if trimmed.is_empty() {
        return Err("warehouseLocation must not be empty".into());
    }
    Ok(trimmed.to_string())
}
