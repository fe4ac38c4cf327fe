//! Log sink port for structured diagnostic records.

use socrates_domain::LogRecord;

/// Destination for [`LogRecord`]s.
///
/// Emission is fire-and-forget: sinks swallow their own I/O failures so that
/// logging can never change the outcome of a call.
pub trait LogSink: Send + Sync {
    fn emit(&self, record: &LogRecord);
}
