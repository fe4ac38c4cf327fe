//! Typed parameters for each domain operation
//!
//! Every struct serializes to exactly the operation-specific fields of its
//! request envelope. Fields that only shape the endpoint path (`api`,
//! `module`) are skipped during serialization.

use chrono::NaiveDateTime;
use serde::{Serialize, Serializer};
use serde_json::Value;

use super::records::{RawDataRecord, RecordsPayload};
use crate::constants::{CONFIG_MODULE, DEFAULT_CONFIG_API, TIMESTAMP_FORMAT};
use crate::errors::ValidationError;

fn serialize_timestamp<S>(timestamp: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_str(&timestamp.format(TIMESTAMP_FORMAT))
}

fn require(value: &str, field: &'static str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::MissingField(field))
    } else {
        Ok(())
    }
}

fn module_path(api: &str, module: &str) -> String {
    format!("/{}/{}", api.trim_matches('/'), module.trim_matches('/'))
}

/// Fetch one definition, or list all of them when `name` is `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DefinitionQuery {
    #[serde(skip)]
    pub api: String,
    #[serde(skip)]
    pub module: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl DefinitionQuery {
    pub fn all(api: impl Into<String>, module: impl Into<String>) -> Self {
        Self { api: api.into(), module: module.into(), name: None }
    }

    pub fn named(
        api: impl Into<String>,
        module: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self { api: api.into(), module: module.into(), name: Some(name.into()) }
    }

    pub fn path(&self) -> String {
        module_path(&self.api, &self.module)
    }
}

/// Definition body for `add` and `update`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DefinitionWrite {
    #[serde(skip)]
    pub api: String,
    #[serde(skip)]
    pub module: String,
    pub name: String,
    pub definition: Value,
}

impl DefinitionWrite {
    pub fn new(
        api: impl Into<String>,
        module: impl Into<String>,
        name: impl Into<String>,
        definition: Value,
    ) -> Self {
        Self { api: api.into(), module: module.into(), name: name.into(), definition }
    }

    pub fn path(&self) -> String {
        module_path(&self.api, &self.module)
    }
}

/// Identifies a definition to delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DefinitionRef {
    #[serde(skip)]
    pub api: String,
    #[serde(skip)]
    pub module: String,
    pub name: String,
}

impl DefinitionRef {
    pub fn new(api: impl Into<String>, module: impl Into<String>, name: impl Into<String>) -> Self {
        Self { api: api.into(), module: module.into(), name: name.into() }
    }

    pub fn path(&self) -> String {
        module_path(&self.api, &self.module)
    }
}

/// Time-window query against a datasource.
///
/// At least one of `key` (iteration field value) or `topic` must be set; both
/// are sent when both are present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RawDataQuery {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    #[serde(serialize_with = "serialize_timestamp")]
    pub start: NaiveDateTime,
    #[serde(serialize_with = "serialize_timestamp")]
    pub end: NaiveDateTime,
}

impl RawDataQuery {
    pub fn new(name: impl Into<String>, start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self { name: name.into(), key: None, topic: None, start, end }
    }

    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn topic(mut self, topic: impl Into<String>) -> Self {
        self.topic = Some(topic.into());
        self
    }

    /// # Errors
    /// [`ValidationError::MissingSeriesSelector`] when neither a non-empty
    /// `key` nor `topic` is set.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require(&self.name, "name")?;
        let has_selector = [&self.key, &self.topic]
            .iter()
            .any(|selector| selector.as_deref().is_some_and(|s| !s.trim().is_empty()));
        if has_selector {
            Ok(())
        } else {
            Err(ValidationError::MissingSeriesSelector)
        }
    }
}

/// Records to append to a datasource.
#[derive(Debug, Clone, PartialEq)]
pub struct RawDataPush {
    pub name: String,
    pub records: RecordsPayload,
}

impl RawDataPush {
    pub fn new(name: impl Into<String>, records: impl Into<RecordsPayload>) -> Self {
        Self { name: name.into(), records: records.into() }
    }

    /// Resolve the records into the wire body.
    ///
    /// # Errors
    /// Propagates [`ValidationError::InvalidRecords`] from a malformed
    /// serialized payload.
    pub fn into_body(self) -> Result<PushRecordsBody, ValidationError> {
        require(&self.name, "name")?;
        Ok(PushRecordsBody { name: self.name, records: self.records.resolve()? })
    }
}

/// Wire fields of `push_raw_data`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PushRecordsBody {
    pub name: String,
    pub records: Vec<RawDataRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IterationSetQuery {
    pub name: String,
}

impl IterationSetQuery {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnreviewedIndexQuery {
    pub name: String,
    pub datasource: String,
}

impl UnreviewedIndexQuery {
    pub fn new(name: impl Into<String>, datasource: impl Into<String>) -> Self {
        Self { name: name.into(), datasource: datasource.into() }
    }
}

/// Configuration lookup; `api` defaults to `archimedes`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigQuery {
    #[serde(skip)]
    pub api: String,
    pub key: String,
}

impl ConfigQuery {
    pub fn new(key: impl Into<String>) -> Self {
        Self { api: DEFAULT_CONFIG_API.to_string(), key: key.into() }
    }

    pub fn with_api(mut self, api: impl Into<String>) -> Self {
        self.api = api.into();
        self
    }

    pub fn path(&self) -> String {
        module_path(&self.api, CONFIG_MODULE)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PredictiveModelQuery {
    pub datasource: String,
    pub definition: String,
}

impl PredictiveModelQuery {
    pub fn new(datasource: impl Into<String>, definition: impl Into<String>) -> Self {
        Self { datasource: datasource.into(), definition: definition.into() }
    }

    /// # Errors
    /// [`ValidationError::MissingField`] for an empty `datasource` or
    /// `definition`.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require(&self.datasource, "datasource")?;
        require(&self.definition, "definition")
    }
}
