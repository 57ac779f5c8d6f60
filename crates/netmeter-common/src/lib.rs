//! # netmeter common
//!
//! Shared types and errors for the netmeter notification-to-sample engine.
//!
//! ## Core Types
//!
//! - [`Envelope`]: decoded notification with event type, payload and context
//! - [`Sample`]: measurement record produced from a notification
//! - [`SampleKind`]: gauge (state), delta or cumulative semantics
//! - [`MeterError`]: unified error type

pub mod error;
pub mod types;

// Re-export commonly used types at crate root
pub use error::{MeterError, RegistryError, Result};
pub use types::{
    envelope::Envelope,
    sample::{parse_timestamp, Sample, SampleKind, SampleParams},
};

/// netmeter version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Volume of every generically extracted sample
pub const GENERIC_VOLUME: f64 = 1.0;
