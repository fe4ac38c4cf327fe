//! Service constants
//!
//! Endpoint paths and wire formats shared by the domain operations.

// Authentication
pub const AUTH_PATH: &str = "/auth";
pub const AUTHORIZATION_SCHEME: &str = "Token";

// Endpoints with a fixed path
pub const DATASOURCE_PATH: &str = "/archimedes/datasource";
pub const SCRAPER_PATH: &str = "/archimedes/scraper";
pub const MODEL_PATH: &str = "/archimedes/model";
pub const CLUSTER_PATH: &str = "/socrates/_cluster";
pub const CONFIG_MODULE: &str = "_config";

/// API used by config lookups when the caller does not name one.
pub const DEFAULT_CONFIG_API: &str = "archimedes";

/// Wire format for raw-data window bounds and record timestamps.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";
pub const TIMESTAMP_FIELD: &str = "timestamp";

/// Metric transforms whose `period` bounds the history a datasource needs.
pub const PERIODIC_METRICS: &[&str] = &["moving_average"];

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
