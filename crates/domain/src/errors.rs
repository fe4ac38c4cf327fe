//! Error types used throughout the client
//!
//! Only [`ConnectError`] is fatal: it is returned when a session cannot be
//! established. Every call made after authentication yields a [`CallResult`]
//! whose error arm is a [`CallFailure`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Detail string reported for any failure that produced no HTTP response.
pub const CONNECTION_ERROR_DETAIL: &str = "connection error";

/// Authentication bootstrap failed; no session exists.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConnectError {
    #[error("authentication rejected with status {status}: {body}")]
    Rejected { status: u16, body: String },

    #[error("authentication request failed: {0}")]
    Transport(String),

    #[error("authentication response did not contain a token: {0}")]
    MissingToken(String),
}

/// Parameter problems detected locally, before any network call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("missing required parameter: {0}")]
    MissingField(&'static str),

    #[error("either key or topic must be supplied")]
    MissingSeriesSelector,

    #[error("unknown interval unit: {0}")]
    UnknownIntervalUnit(String),

    #[error("invalid records payload: {0}")]
    InvalidRecords(String),

    #[error("invalid datasource definition: {0}")]
    InvalidDefinition(String),
}

/// Error arm of every post-authentication call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CallFailure {
    /// The service answered with a status other than 200.
    #[error("service returned status {status}: {body}")]
    Remote { status: u16, body: String },

    /// No HTTP response was received (refused, unreachable, timed out).
    #[error("connection error: {cause}")]
    Transport { cause: String },

    /// The service answered 200 but the body was not JSON.
    #[error("invalid response body ({reason}): {body}")]
    InvalidResponse { body: String, reason: String },

    #[error("failed to encode request: {reason}")]
    Encoding { reason: String },

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl CallFailure {
    /// Caller-facing detail: the raw response body for service answers,
    /// [`CONNECTION_ERROR_DETAIL`] when nothing came back.
    pub fn detail(&self) -> String {
        match self {
            Self::Remote { body, .. } | Self::InvalidResponse { body, .. } => body.clone(),
            Self::Transport { .. } => CONNECTION_ERROR_DETAIL.to_string(),
            Self::Encoding { reason } => reason.clone(),
            Self::Validation(err) => err.to_string(),
        }
    }

    /// HTTP status, when the service produced one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Remote { status, .. } => Some(*status),
            Self::InvalidResponse { .. } => Some(200),
            _ => None,
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }
}

/// Outcome of a dispatched call: `Ok` carries the decoded body.
pub type CallResult<T = serde_json::Value> = std::result::Result<T, CallFailure>;

/// Umbrella error for callers that want a single error type
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum SocratesError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Connection error: {0}")]
    Connect(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Remote error: {0}")]
    Remote(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<ConnectError> for SocratesError {
    fn from(err: ConnectError) -> Self {
        Self::Connect(err.to_string())
    }
}

impl From<ValidationError> for SocratesError {
    fn from(err: ValidationError) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<CallFailure> for SocratesError {
    fn from(err: CallFailure) -> Self {
        match err {
            CallFailure::Remote { .. } | CallFailure::InvalidResponse { .. } => {
                Self::Remote(err.detail())
            }
            CallFailure::Transport { cause } => Self::Network(cause),
            CallFailure::Encoding { reason } => Self::Internal(reason),
            CallFailure::Validation(inner) => inner.into(),
        }
    }
}

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, SocratesError>;
