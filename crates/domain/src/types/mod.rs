//! Domain types and models

pub mod envelope;
pub mod log;
pub mod params;
pub mod records;
pub mod session;

pub use envelope::{NoFields, Operation, RequestEnvelope};
pub use log::{LogRecord, Severity};
pub use params::{
    ConfigQuery, DefinitionQuery, DefinitionRef, DefinitionWrite, IterationSetQuery,
    PredictiveModelQuery, PushRecordsBody, RawDataPush, RawDataQuery, UnreviewedIndexQuery,
};
pub use records::{RawDataRecord, RecordsPayload};
pub use session::{Credentials, ServiceEndpoint, Session};
