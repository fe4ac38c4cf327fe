//! Raw time-series records pushed to and read from a datasource
//!
//! The client does not validate record schemas; that is the service's job.
//! The only structure enforced here is "a JSON object", with a conventional
//! `timestamp` field.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::constants::{TIMESTAMP_FIELD, TIMESTAMP_FORMAT};
use crate::errors::ValidationError;

/// One record: field name → value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawDataRecord(Map<String, Value>);

impl RawDataRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_map(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Set `field`, replacing any previous value.
    pub fn with_field(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(field.into(), value.into());
        self
    }

    pub fn with_timestamp(self, timestamp: NaiveDateTime) -> Self {
        let formatted = timestamp.format(TIMESTAMP_FORMAT).to_string();
        self.with_field(TIMESTAMP_FIELD, formatted)
    }

    /// Parsed `timestamp` field, if present and well-formed.
    pub fn timestamp(&self) -> Option<NaiveDateTime> {
        self.0
            .get(TIMESTAMP_FIELD)
            .and_then(Value::as_str)
            .and_then(|raw| NaiveDateTime::parse_from_str(raw, TIMESTAMP_FORMAT).ok())
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for RawDataRecord {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

/// Records as handed to `push_raw_data`: native, or already serialized.
///
/// Both forms resolve to the same record list, so equivalent inputs produce
/// identical request bodies.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordsPayload {
    Records(Vec<RawDataRecord>),
    Json(String),
}

impl RecordsPayload {
    /// Decode into native records.
    ///
    /// # Errors
    /// Returns [`ValidationError::InvalidRecords`] if the serialized form is not
    /// a JSON array of objects.
    pub fn resolve(self) -> Result<Vec<RawDataRecord>, ValidationError> {
        match self {
            Self::Records(records) => Ok(records),
            Self::Json(raw) => serde_json::from_str::<Vec<RawDataRecord>>(&raw)
                .map_err(|e| ValidationError::InvalidRecords(e.to_string())),
        }
    }
}

impl From<Vec<RawDataRecord>> for RecordsPayload {
    fn from(records: Vec<RawDataRecord>) -> Self {
        Self::Records(records)
    }
}

impl From<String> for RecordsPayload {
    fn from(raw: String) -> Self {
        Self::Json(raw)
    }
}

impl From<&str> for RecordsPayload {
    fn from(raw: &str) -> Self {
        Self::Json(raw.to_string())
    }
}
