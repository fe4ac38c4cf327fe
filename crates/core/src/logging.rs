//! Structured logger
//!
//! Formats diagnostic events as [`LogRecord`]s and hands them to an injected
//! [`LogSink`]. The logger holds no mutable state and can be shared freely.

use std::sync::{Arc, Mutex, PoisonError};

use serde_json::Value;
use socrates_domain::{LogRecord, Severity};

use crate::log_ports::LogSink;

/// Logger with a severity threshold and an optional host label.
#[derive(Clone)]
pub struct StructuredLogger {
    sink: Arc<dyn LogSink>,
    threshold: Severity,
    host: Option<String>,
}

impl StructuredLogger {
    /// Logger that forwards records passing `threshold` to `sink`.
    pub fn new(sink: Arc<dyn LogSink>, threshold: Severity) -> Self {
        Self { sink, threshold, host: None }
    }

    /// Label every record with `host`.
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    pub fn threshold(&self) -> Severity {
        self.threshold
    }

    pub fn enabled(&self, severity: Severity) -> bool {
        severity.passes(self.threshold)
    }

    /// Emit one record.
    ///
    /// `operation` names the calling procedure, `input` the context it was
    /// working on.
    pub fn log(
        &self,
        severity: Severity,
        operation: &str,
        input: &str,
        message: &str,
        detail: Option<Value>,
    ) {
        if !self.enabled(severity) {
            return;
        }
        let mut record = LogRecord::new(severity, operation, input, message);
        if let Some(detail) = detail {
            record = record.with_detail(detail);
        }
        if let Some(host) = &self.host {
            record = record.with_host(host.clone());
        }
        self.sink.emit(&record);
    }

    pub fn error(&self, operation: &str, input: &str, message: &str, detail: Option<Value>) {
        self.log(Severity::Error, operation, input, message, detail);
    }

    pub fn info(&self, operation: &str, input: &str, message: &str) {
        self.log(Severity::Info, operation, input, message, None);
    }
}

impl std::fmt::Debug for StructuredLogger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StructuredLogger")
            .field("threshold", &self.threshold)
            .field("host", &self.host)
            .finish_non_exhaustive()
    }
}

/// Sink that keeps records in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Mutex<Vec<LogRecord>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<LogRecord> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn len(&self) -> usize {
        self.records.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl LogSink for MemorySink {
    fn emit(&self, record: &LogRecord) {
        self.records.lock().unwrap_or_else(PoisonError::into_inner).push(record.clone());
    }
}

/// Sink that discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl LogSink for NullSink {
    fn emit(&self, _record: &LogRecord) {}
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn logger(threshold: Severity) -> (StructuredLogger, Arc<MemorySink>) {
        let sink = Arc::new(MemorySink::new());
        (StructuredLogger::new(sink.clone(), threshold), sink)
    }

    #[test]
    fn every_severity_emits_well_formed_json() {
        let (logger, sink) = logger(Severity::Debug);
        for severity in Severity::ALL {
            logger.log(severity, "tests", "test_input", "message", None);
        }

        let records = sink.records();
        assert_eq!(records.len(), 5);
        for (record, severity) in records.iter().zip(Severity::ALL) {
            let value: Value = serde_json::from_str(&record.to_json_line()).unwrap();
            let object = value.as_object().unwrap();
            assert_eq!(object.len(), 5);
            assert_eq!(object["severity"], json!(severity.as_str()));
            assert_eq!(object["operation"], json!("tests"));
            assert_eq!(object["input"], json!("test_input"));
            assert!(object.contains_key("timestamp"));
        }
    }

    #[test]
    fn detail_is_attached_when_given() {
        let (logger, sink) = logger(Severity::Error);
        logger.error("socrates.get_raw_data", "stocks", "failed", Some(json!("boom")));

        let value = serde_json::to_value(&sink.records()[0]).unwrap();
        assert_eq!(value["detail"], json!("boom"));
        assert_eq!(value.as_object().unwrap().len(), 6);
    }

    #[test]
    fn threshold_filters_verbose_records() {
        let (logger, sink) = logger(Severity::Error);
        logger.log(Severity::Debug, "op", "in", "noise", None);
        logger.log(Severity::Error, "op", "in", "kept", None);
        logger.info("op", "in", "also kept");

        let messages: Vec<_> = sink.records().into_iter().map(|r| r.message).collect();
        assert_eq!(messages, ["kept", "also kept"]);
    }

    #[test]
    fn host_label_is_added() {
        let (logger, sink) = logger(Severity::Debug);
        logger.with_host("worker-7").info("op", "in", "hello");
        assert_eq!(sink.records()[0].host.as_deref(), Some("worker-7"));
    }

    #[test]
    fn null_sink_accepts_records() {
        let logger = StructuredLogger::new(Arc::new(NullSink), Severity::Debug);
        logger.info("op", "in", "dropped");
        assert!(logger.enabled(Severity::Debug));
    }
}
