//! # Socrates Domain
//!
//! Data types shared by the Socrates client crates.
//!
//! This crate contains:
//! - Session and endpoint types
//! - Request envelopes and typed per-operation parameters
//! - Raw time-series record shapes
//! - Structured log records
//! - Error types and `CallResult`
//! - Client configuration structures
//!
//! ## Architecture
//! - No dependencies on other Socrates crates
//! - No I/O

pub mod config;
pub mod constants;
pub mod errors;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
