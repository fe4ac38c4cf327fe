//! # Socrates Core
//!
//! Transport-agnostic client logic.
//!
//! This crate contains:
//! - Port interfaces (`Transport`, `LogSink`)
//! - Structured logger
//! - Session authenticator and envelope dispatcher
//! - The domain operation façade, `SocratesClient`
//! - Pure helpers (interval parsing, metric periods)
//!
//! ## Architecture Principles
//! - Only depends on `socrates-domain`
//! - No HTTP library or output stream code
//! - All external effects via traits

pub mod auth;
pub mod client;
pub mod dispatch;
pub mod logging;
pub mod utils;

// Ports
pub mod log_ports;
pub mod transport_ports;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

pub use auth::Authenticator;
pub use client::SocratesClient;
pub use dispatch::Dispatcher;
pub use log_ports::LogSink;
pub use logging::{MemorySink, NullSink, StructuredLogger};
pub use transport_ports::{
    Transport, TransportError, TransportErrorKind, TransportRequest, TransportResponse,
};
pub use utils::{interval_to_duration, lookback_window, max_metric_period, IntervalUnit};
