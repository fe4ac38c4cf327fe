//! Client configuration structures

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_TIMEOUT_SECS;
use crate::types::{Credentials, ServiceEndpoint, Severity};

/// Connection parameters for one authenticated client
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Service host, optionally with port (no scheme)
    pub service_address: String,
    #[serde(default = "default_true")]
    pub use_tls: bool,
    #[serde(default = "default_true")]
    pub verify_certificate: bool,
    /// Per-request timeout, applied to `/auth` and every call
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    pub username: String,
    pub password: String,
    /// Structured-log threshold
    #[serde(default = "default_log_threshold")]
    pub log_threshold: Severity,
}

fn default_true() -> bool {
    true
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_log_threshold() -> Severity {
    Severity::Error
}

impl ClientConfig {
    pub fn new(
        service_address: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            service_address: service_address.into(),
            use_tls: true,
            verify_certificate: true,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            username: username.into(),
            password: password.into(),
            log_threshold: default_log_threshold(),
        }
    }

    pub fn endpoint(&self) -> ServiceEndpoint {
        ServiceEndpoint::new(self.service_address.clone(), self.use_tls, self.verify_certificate)
    }

    pub fn credentials(&self) -> Credentials {
        Credentials::new(self.username.clone(), self.password.clone())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("service_address", &self.service_address)
            .field("use_tls", &self.use_tls)
            .field("verify_certificate", &self.verify_certificate)
            .field("timeout_secs", &self.timeout_secs)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("log_threshold", &self.log_threshold)
            .finish()
    }
}
