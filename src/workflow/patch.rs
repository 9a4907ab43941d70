//! Sparse field sets for partial updates.
//!
//! A [`FieldSet`] is decoded into a [`RecordPatch`] before anything is
//! written. Decoding walks `stockQuantity`, `warehouseLocation` and
//! `lastUpdated` in that order and stops at the first invalid field, so a
//! partial update is all-or-nothing.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::{Map, Value};
use tracing::debug;

use crate::record::{validate_location, validate_stock};

pub const STOCK_QUANTITY: &str = "stockQuantity";
pub const WAREHOUSE_LOCATION: &str = "warehouseLocation";
pub const LAST_UPDATED: &str = "lastUpdated";

/// A single loosely typed field value.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// A value as it arrived on the wire.
    Json(Value),
    /// An already parsed timestamp.
    Instant(DateTime<Utc>),
}

impl From<Value> for FieldValue {
    fn from(value: Value) -> Self {
        FieldValue::Json(value)
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(at: DateTime<Utc>) -> Self {
        FieldValue::Instant(at)
    }
}

impl From<i64> for FieldValue {
    fn from(n: i64) -> Self {
        FieldValue::Json(Value::from(n))
    }
}

impl From<i32> for FieldValue {
    fn from(n: i32) -> Self {
        FieldValue::Json(Value::from(n))
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Json(Value::from(s))
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Json(Value::from(s))
    }
}

/// Named fields supplied to a partial update.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldSet {
    fields: BTreeMap<String, FieldValue>,
}

impl FieldSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        self.fields.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(|k| k.as_str())
    }
}

impl From<Map<String, Value>> for FieldSet {
    fn from(map: Map<String, Value>) -> Self {
        Self {
            fields: map
                .into_iter()
                .map(|(name, value)| (name, FieldValue::Json(value)))
                .collect(),
        }
    }
}

/// Validated changes extracted from a [`FieldSet`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordPatch {
    pub stock: Option<u32>,
    pub location: Option<String>,
    pub last_updated: Option<DateTime<Utc>>,
}

impl TryFrom<&FieldSet> for RecordPatch {
    type Error = String;

    fn try_from(fields: &FieldSet) -> Result<Self, Self::Error> {
        for name in fields.names() {
            if ![STOCK_QUANTITY, WAREHOUSE_LOCATION, LAST_UPDATED].contains(&name) {
                debug!(field = name, "ignoring unknown field in partial update");
            }
        }

        let stock = fields.get(STOCK_QUANTITY).map(coerce_stock).transpose()?;
        let location = fields
            .get(WAREHOUSE_LOCATION)
            .map(coerce_location)
            .transpose()?;
        let last_updated = fields
            .get(LAST_UPDATED)
            .map(coerce_timestamp)
            .transpose()?;

        Ok(Self {
            stock,
            location,
            last_updated,
        })
    }
}

fn coerce_stock(value: &FieldValue) -> Result<u32, String> {
    let number = match value {
        FieldValue::Json(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
        _ => None,
    };
    let number = number.ok_or_else(|| format!("{} must be an integer", STOCK_QUANTITY))?;
    validate_stock(number)
}

fn coerce_location(value: &FieldValue) -> Result<String, String> {
    match value {
        FieldValue::Json(Value::String(s)) => validate_location(s),
        _ => Err(format!("{} must be a string", WAREHOUSE_LOCATION)),
    }
}

fn coerce_timestamp(value: &FieldValue) -> Result<DateTime<Utc>, String> {
    match value {
        FieldValue::Instant(at) => Ok(*at),
        FieldValue::Json(Value::String(s)) => parse_timestamp(s),
        _ => Err(format!("{} must be an ISO-8601 date-time", LAST_UPDATED)),
    }
}

/// Parse an ISO-8601 timestamp.
///
/// Accepts RFC 3339 (`2024-05-01T10:00:00Z`, any offset), a naive date-time
/// (`2024-05-01T10:00:00`, read as UTC) and a plain date (`2024-05-01`,
/// midnight UTC).
pub fn parse_timestamp(text: &str) -> Result<DateTime<Utc>, String> {
    let text = text.trim();
    if let Ok(at) = DateTime::parse_from_rfc3339(text) {
        return Ok(at.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(naive.and_utc());
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| format!("invalid date format for {}: {:?}", LAST_UPDATED, text))
}
