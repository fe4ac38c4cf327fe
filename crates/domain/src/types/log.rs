//! Structured diagnostic records

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

use crate::errors::SocratesError;

/// Record severity. The numeric rank doubles as a verbosity threshold:
/// a record is shown when its rank is at most the threshold's rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    Exception,
    Info,
    Warn,
    Error,
    Debug,
}

impl Severity {
    pub const ALL: [Self; 5] = [Self::Exception, Self::Info, Self::Warn, Self::Error, Self::Debug];

    pub fn rank(self) -> u8 {
        match self {
            Self::Exception => 0,
            Self::Info => 1,
            Self::Warn => 2,
            Self::Error => 3,
            Self::Debug => 4,
        }
    }

    pub fn from_rank(rank: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|severity| severity.rank() == rank)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Exception => "EXCEPTION",
            Self::Info => "INFO",
            Self::Warn => "WARN",
            Self::Error => "ERROR",
            Self::Debug => "DEBUG",
        }
    }

    /// Whether a record of this severity passes `threshold`.
    pub fn passes(self, threshold: Self) -> bool {
        self.rank() <= threshold.rank()
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accepts a severity name (any case) or its numeric rank.
impl FromStr for Severity {
    type Err = SocratesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(rank) = trimmed.parse::<u8>() {
            return Self::from_rank(rank)
                .ok_or_else(|| SocratesError::Validation(format!("unknown log level: {rank}")));
        }
        Self::ALL
            .into_iter()
            .find(|severity| severity.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| SocratesError::Validation(format!("unknown log level: {trimmed}")))
    }
}

fn serialize_rfc3339<S>(timestamp: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&timestamp.to_rfc3339_opts(SecondsFormat::Micros, true))
}

/// One diagnostic event, emitted as a single JSON object.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogRecord {
    #[serde(serialize_with = "serialize_rfc3339")]
    pub timestamp: DateTime<Utc>,
    pub severity: Severity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    pub operation: String,
    pub input: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<Value>,
}

impl LogRecord {
    pub fn new(
        severity: Severity,
        operation: impl Into<String>,
        input: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            severity,
            host: None,
            operation: operation.into(),
            input: input.into(),
            message: message.into(),
            detail: None,
        }
    }

    pub fn with_detail(mut self, detail: Value) -> Self {
        self.detail = Some(detail);
        self
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Single-line JSON rendering.
    pub fn to_json_line(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|e| {
            serde_json::json!({
                "severity": Severity::Exception,
                "operation": self.operation,
                "message": format!("unserializable log record: {e}"),
            })
            .to_string()
        })
    }
}
