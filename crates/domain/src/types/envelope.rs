//! Request envelope sent as the body of every call

use serde::{Deserialize, Serialize};

/// Operation discriminator carried in the `operation` field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Get,
    Add,
    Update,
    Delete,
    GetRawData,
    PushRawData,
    GetIterationSet,
    GetUnreviewedIndexRecords,
    GetNodes,
    GetServices,
}

impl Operation {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "get",
            Self::Add => "add",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::GetRawData => "get_raw_data",
            Self::PushRawData => "push_raw_data",
            Self::GetIterationSet => "get_iteration_set",
            Self::GetUnreviewedIndexRecords => "get_unreviewed_index_records",
            Self::GetNodes => "get_nodes",
            Self::GetServices => "get_services",
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// JSON object `{ "operation": ..., <fields> }`.
///
/// `fields` must serialize as a map or struct; its entries are flattened next
/// to `operation`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RequestEnvelope<T> {
    pub operation: Operation,
    #[serde(flatten)]
    pub fields: T,
}

impl<T: Serialize> RequestEnvelope<T> {
    pub fn new(operation: Operation, fields: T) -> Self {
        Self { operation, fields }
    }
}

/// Field set for operations that carry only the discriminator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct NoFields {}

impl RequestEnvelope<NoFields> {
    pub fn bare(operation: Operation) -> Self {
        Self { operation, fields: NoFields {} }
    }
}
