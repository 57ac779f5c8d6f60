//! Custom transforms
//!
//! Descriptors whose notifications are not resource-shaped bypass the
//! generic pipeline entirely and produce their own samples.

pub mod bandwidth;

pub use bandwidth::{BANDWIDTH_COUNTER, BANDWIDTH_EVENT_TYPE, BANDWIDTH_UNIT, MAX_EXACT_BYTES};
