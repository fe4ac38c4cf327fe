//! # Socrates Infrastructure
//!
//! Infrastructure implementations of core ports.
//!
//! This crate contains:
//! - The reqwest-backed HTTP transport
//! - Log sinks (stdout JSON lines, `tracing` forwarding)
//! - Configuration loading (environment, JSON/TOML files)
//! - `connect()` wiring for a ready-to-use client
//!
//! ## Architecture
//! - Implements traits defined in `socrates-core`
//! - Depends on `socrates-domain` and `socrates-core`
//! - Contains all "impure" code (network, stdout, filesystem, environment)

pub mod config;
pub mod connect;
mod errors;
pub mod http;
pub mod observability;

// Re-export commonly used items
pub use connect::{connect, connect_from_env, connect_with_sink};
pub use http::{HttpTransport, HttpTransportBuilder};
pub use observability::{StdoutSink, TracingSink, WriterSink};
