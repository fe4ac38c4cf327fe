//! Log sinks for structured client records
//!
//! - [`StdoutSink`]: one JSON object per line on standard output
//! - [`WriterSink`]: the same, into any `io::Write`
//! - [`TracingSink`]: forwards records as `tracing` events
//!
//! Write failures are swallowed after a `tracing::warn!`; a broken log stream
//! never changes the result of a call.

use std::io::{self, Write};
use std::sync::{Mutex, PoisonError};

use socrates_core::LogSink;
use socrates_domain::{LogRecord, Severity};

/// Writes each record as a JSON line to standard output.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutSink;

impl StdoutSink {
    pub fn new() -> Self {
        Self
    }
}

impl LogSink for StdoutSink {
    fn emit(&self, record: &LogRecord) {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        if let Err(err) = writeln!(handle, "{}", record.to_json_line()) {
            tracing::warn!(error = %err, "failed to write log record to stdout");
        }
    }
}

/// Writes each record as a JSON line to an arbitrary writer.
#[derive(Debug)]
pub struct WriterSink<W> {
    writer: Mutex<W>,
}

impl<W: Write + Send> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer: Mutex::new(writer) }
    }

    pub fn into_inner(self) -> W {
        self.writer.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<W: Write + Send> LogSink for WriterSink<W> {
    fn emit(&self, record: &LogRecord) {
        let mut writer = match self.writer.lock() {
            Ok(guard) => guard,
            Err(poison_err) => {
                tracing::warn!("log writer mutex poisoned, recovering");
                poison_err.into_inner()
            }
        };
        let result =
            writeln!(writer, "{}", record.to_json_line()).and_then(|()| writer.flush());
        if let Err(err) = result {
            tracing::warn!(error = %err, "failed to write log record");
        }
    }
}

/// Re-emits records as `tracing` events under the `socrates` target.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn emit(&self, record: &LogRecord) {
        let detail = record.detail.as_ref().map(ToString::to_string);
        let detail = detail.as_deref().unwrap_or("");
        match record.severity {
            Severity::Exception | Severity::Error => tracing::error!(
                target: "socrates",
                operation = %record.operation,
                input = %record.input,
                detail,
                "{}",
                record.message
            ),
            Severity::Warn => tracing::warn!(
                target: "socrates",
                operation = %record.operation,
                input = %record.input,
                detail,
                "{}",
                record.message
            ),
            Severity::Info => tracing::info!(
                target: "socrates",
                operation = %record.operation,
                input = %record.input,
                detail,
                "{}",
                record.message
            ),
            Severity::Debug => tracing::debug!(
                target: "socrates",
                operation = %record.operation,
                input = %record.input,
                detail,
                "{}",
                record.message
            ),
        }
    }
}
